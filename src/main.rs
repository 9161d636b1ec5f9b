//! cyclegen's main application entry point and orchestration logic.
//! Handles command-line argument parsing and hands the resulting request to
//! the processor.

use cyclegen::{
    catalog::FieldListCatalog,
    cli::{get_args, Args},
    config::get_config,
    descriptor::{DirectoryExampleSource, ExampleSource},
    error::{default_error_handler, Result},
    output::OutputWriter,
    processor::Processor,
    renderer::MiniJinjaRenderer,
    templates::Templates,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration of the working directory
/// 2. Builds the generation request from the arguments
/// 3. Loads the templates, applying overrides
/// 4. Writes the header, registration entries, source and job configuration
fn run(args: Args) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = get_config(&root)?;
    let catalog = FieldListCatalog::new();
    let request = args.to_request(&config, &catalog, &root)?;

    let templates = match args.templates.as_ref().or(config.templates_dir.as_ref()) {
        Some(dir) => Templates::with_overrides(dir)?,
        None => Templates::default(),
    };
    let examples = args
        .examples
        .clone()
        .or_else(|| config.examples_dir.clone())
        .map(DirectoryExampleSource::new)
        .or_else(DirectoryExampleSource::from_env);

    let engine = MiniJinjaRenderer::new();
    let writer = OutputWriter::new(config.backup_suffix.clone());
    let processor = Processor::new(
        &engine,
        &templates,
        &config.style,
        &writer,
        examples.as_ref().map(|e| e as &dyn ExampleSource),
    );

    let report = processor.process(&request)?;
    for path in &report.created {
        println!("Created: '{}'", path.display());
    }

    println!("Cycle '{}' created successfully.", request.cycle);
    Ok(())
}
