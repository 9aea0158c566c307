// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod queries;
pub mod render;
pub mod symbol_table;
