// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use ansi_term::Colour::{Blue, Green, Yellow};
use ansi_term::Style;
use anyhow::{Context, Result};
use cargo_strgen_common::manifest::GenerationManifest;
use cargo_strgen_impl::{
    GenerationCounter, GenerationRun, GeneratorDriver, MarkerSpec, SourceArtifact, summarize,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::project::Project;

///
/// A generator bound to one project. Passes run through the same driver, so
/// the cache and the generation counter carry over from one pass to the next.
///
pub struct Session {
    project: Project,
    driver: GeneratorDriver,
}

impl Session {
    /// Set up a driver for the project, primed from the manifest of any
    /// earlier run so that unchanged artifacts are left alone on disk
    pub fn open(project: Project) -> Result<Self> {
        let mut driver =
            GeneratorDriver::from_config(&project.config, Arc::new(GenerationCounter::new()))
                .context("Invalid generator configuration")?;

        let output_dir = project.output_dir();
        if let Some(manifest) = GenerationManifest::load_from_dir(&output_dir)? {
            if manifest.crate_name == project.crate_name {
                let seeded = driver.seed_from_manifest(&manifest);
                debug!(seeded, "seeded cache from manifest");
            } else {
                debug!(found = %manifest.crate_name, "ignoring manifest of another crate");
            }
        }

        Ok(Self { project, driver })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Load the sources, run the generator and bring the output directory up to date
    pub fn pass(&mut self) -> Result<GenerationRun> {
        let mut compilation = self.project.load_compilation()?;
        let run = self
            .driver
            .run(&mut compilation)
            .context("Generation failed")?;
        write_outputs(&self.project, &run)?;
        Ok(run)
    }
}

/// Write what the run produced into the project's output directory
pub fn write_outputs(project: &Project, run: &GenerationRun) -> Result<()> {
    let output_dir = project.output_dir();
    fs::create_dir_all(&output_dir)
        .context(format!("Failed to create directory: {}", output_dir.display()))?;

    write_if_changed(&output_dir, &run.marker_artifact)?;
    for (_, artifact) in &run.artifacts {
        write_if_changed(&output_dir, artifact)?;
    }

    for name in &run.removed {
        let path = output_dir.join(name);
        if path.exists() {
            fs::remove_file(&path)
                .context(format!("Failed to remove stale artifact: {}", path.display()))?;
        }
    }

    run.to_manifest(
        &project.crate_name,
        &output_dir,
        &project.config.artifact_extension,
    )
    .serialize_to_file()?;
    Ok(())
}

/// Returns whether the file was (re)written
fn write_if_changed(dir: &Path, artifact: &SourceArtifact) -> Result<bool> {
    let path = dir.join(&artifact.hint_name);
    if fs::read_to_string(&path).is_ok_and(|existing| existing == artifact.text) {
        return Ok(false);
    }
    fs::write(&path, &artifact.text)
        .context(format!("Failed to write artifact: {}", path.display()))?;
    Ok(true)
}

pub fn print_run(run: &GenerationRun) {
    for (_, artifact) in &run.artifacts {
        if run.is_emitted(&artifact.hint_name) {
            println!("  {} {}", Green.paint("generated"), artifact.hint_name);
        } else {
            println!("  {} {}", Blue.paint("unchanged"), artifact.hint_name);
        }
    }
    for name in &run.removed {
        println!("  {} {}", Yellow.paint("removed"), name);
    }
    println!(
        "{} {} generated, {} unchanged, {} removed",
        Style::new().bold().paint("cargo-strgen:"),
        run.emitted.len(),
        run.reused.len(),
        run.removed.len()
    );
}

/// Print the summary of every marked type, without writing anything
pub fn print_summaries(project: &Project) -> Result<()> {
    let mut compilation = project.load_compilation()?;
    let marker = project.config.marker_path.as_str();

    // The marker has to be resolvable before summaries can be extracted
    let definition = MarkerSpec::parse(marker)
        .and_then(|spec| spec.definition())
        .context("Invalid marker path")?;
    compilation
        .add_artifact(&definition)
        .context("Failed to inject marker definition")?;

    let summaries = summarize(&compilation, marker);
    if summaries.is_empty() {
        println!("{}", Yellow.paint(format!("No types marked with {marker}")));
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{}::{}",
            Blue.paint(summary.namespace_name()),
            Style::new().bold().paint(summary.type_name())
        );
        for member in summary.member_names() {
            println!("    {}", member);
        }
    }
    Ok(())
}
