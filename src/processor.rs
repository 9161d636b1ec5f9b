//! Orchestration of a single cycle generation run.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::config::CodeStyle;
use crate::descriptor::{add_job_config_schema, create_descriptor, ExampleSource, JOB_CONFIG_SCHEMA};
use crate::error::Result;
use crate::generator::CycleGenerator;
use crate::output::{write_file, OutputWriter};
use crate::paths::{absolute, include_path};
use crate::registration::{add_registration, MergeOutcome};
use crate::renderer::TemplateRenderer;
use crate::request::GenerationRequest;
use crate::templates::Templates;

/// Files touched by a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written from scratch, in the order they were written.
    pub created: Vec<PathBuf>,
    /// Existing files that were moved aside before being replaced.
    pub backups: Vec<PathBuf>,
    /// What happened to the registration file, if it could be updated.
    pub registration: Option<MergeOutcome>,
    /// Whether the job configuration schema was copied next to the descriptor.
    pub schema_copied: bool,
}

pub struct Processor<'a> {
    generator: CycleGenerator<'a>,
    writer: &'a OutputWriter,
    examples: Option<&'a dyn ExampleSource>,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        templates: &'a Templates,
        style: &'a CodeStyle,
        writer: &'a OutputWriter,
        examples: Option<&'a dyn ExampleSource>,
    ) -> Self {
        Self { generator: CycleGenerator::new(renderer, templates, style), writer, examples }
    }

    /// Generates the header, registration entries, source and job
    /// configuration of `request`, in that order.
    ///
    /// Failing to write the header or source aborts the run. Problems with the
    /// registration file or the job configuration are logged and the run goes on.
    pub fn process(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        info!("Creating cycle '{}'", request.cycle);

        let header = self.generator.header(request)?;
        self.write(&request.header_path, &header, &mut report)?;

        match self.register(request) {
            Ok(outcome) => {
                if outcome == MergeOutcome::Created {
                    report.created.push(request.registration_path.clone());
                }
                report.registration = Some(outcome);
            }
            Err(e) => error!("Could not update '{}': {}", request.registration_path.display(), e),
        }

        let include = include_path(&absolute(&request.header_path), &absolute(&request.source_path));
        debug!("Including the header as '{include}'");
        let source = self.generator.source(request, &include)?;
        self.write(&request.source_path, &source, &mut report)?;

        self.describe(request, &mut report);
        Ok(report)
    }

    fn register(&self, request: &GenerationRequest) -> Result<MergeOutcome> {
        let lines = self.generator.registration_lines(request)?;
        add_registration(&request.registration_path, &lines, |lines| {
            self.generator.registration_file(lines)
        })
    }

    fn describe(&self, request: &GenerationRequest, report: &mut GenerationReport) {
        let Some(examples) = self.examples else {
            warn!(
                "No example job configuration available, skipping '{}'",
                request.descriptor_path.display()
            );
            return;
        };

        match create_descriptor(examples, request, |path, content| self.write(path, content, report)) {
            Ok(path) => debug!("Job configuration written to '{}'", path.display()),
            Err(e) => {
                error!("Could not create the job configuration: {e}");
                return;
            }
        }

        let config_dir = request.descriptor_path.parent().unwrap_or_else(|| Path::new("."));
        match add_job_config_schema(examples, config_dir) {
            Ok(copied) => {
                if copied {
                    report.created.push(config_dir.join(JOB_CONFIG_SCHEMA));
                }
                report.schema_copied = copied;
            }
            Err(e) => error!("Could not copy the job configuration schema: {e}"),
        }
    }

    fn write(&self, path: &Path, content: &str, report: &mut GenerationReport) -> Result<()> {
        if let Some(backup) = self.writer.backup(path)? {
            report.backups.push(backup);
        }
        write_file(path, content)?;
        report.created.push(path.to_path_buf());
        Ok(())
    }
}
