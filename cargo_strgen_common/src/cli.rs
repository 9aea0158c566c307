// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

// Strgen Commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrgenCommand {
    #[default]
    Generate,
    PrintSummaries,
    GenerateConfig,
    Watch,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StrgenArgs {
    pub command: StrgenCommand,
    pub config_path: Option<String>,
    pub out_dir: Option<String>,
    /// Arguments we did not recognise. Reported to the user rather than ignored.
    pub unknown_args: Vec<String>,
}

impl StrgenArgs {
    pub fn parse<I>(args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut command = StrgenCommand::Generate;
        let mut config_path = None;
        let mut out_dir = None;

        let args: Vec<String> = args.collect();

        // Skip the program name, and 'strgen' if we were invoked as 'cargo strgen'
        let mut start_idx = 1;
        if args.get(1).map(String::as_str) == Some("strgen") {
            start_idx = 2;
        }

        if let Some(arg) = args.get(start_idx) {
            let parsed = match arg.as_str() {
                "generate" => Some(StrgenCommand::Generate),
                "print-summaries" => Some(StrgenCommand::PrintSummaries),
                "generate-config" => Some(StrgenCommand::GenerateConfig),
                "watch" => Some(StrgenCommand::Watch),
                _ => None,
            };
            if let Some(parsed) = parsed {
                command = parsed;
                start_idx += 1;
            }
        }

        let mut unknown_args = Vec::new();
        let mut i = start_idx;
        while i < args.len() {
            let flag = args[i].as_str();
            let target = match flag {
                "--config" => Some(&mut config_path),
                "--out-dir" => Some(&mut out_dir),
                _ => None,
            };
            match target {
                Some(slot) => {
                    if let Some(value) = args.get(i + 1) {
                        *slot = Some(value.clone());
                        i += 2;
                    } else {
                        eprintln!("Warning: {flag} flag requires a path argument");
                        i += 1;
                    }
                }
                None => {
                    unknown_args.push(args[i].clone());
                    i += 1;
                }
            }
        }

        Self {
            command,
            config_path,
            out_dir,
            unknown_args,
        }
    }
}
