// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod cli;
pub mod manifest;
pub mod workspace;
