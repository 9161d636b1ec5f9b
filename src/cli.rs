//! Command-line interface implementation for cyclegen.
//! Provides argument parsing and the translation of arguments into a
//! generation request.

use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, DEFAULT_COLLECTION};
use crate::config::Config;
use crate::declaration::Declaration;
use crate::error::Result;
use crate::paths::Layout;
use crate::request::{CycleName, GenerationRequest};
use crate::tokenizer::read_declarations;

/// Command-line arguments structure for cyclegen.
#[derive(Parser, Debug)]
#[command(author, version, about = "cyclegen: analysis cycle torso creator", long_about = None)]
pub struct Args {
    /// Name of the analysis cycle to create, optionally as Namespace::Class
    #[arg(short, long, default_value = "AnalysisCycle")]
    pub name: String,

    /// Name of the LinkDef.h file in the package
    #[arg(short, long, value_name = "FILE")]
    pub linkdef: Option<PathBuf>,

    /// Input data file. The tree name and the variable list can be read from here
    #[arg(short, long, value_name = "FILE")]
    pub rootfile: Option<PathBuf>,

    /// Name of the tree in the input file
    #[arg(short, long)]
    pub treename: Option<String>,

    /// File containing a list of variable declarations to be used in the cycle.
    /// Can contain comments
    #[arg(short, long, value_name = "FILE")]
    pub declarations: Option<PathBuf>,

    /// Name of the analysis package. Defaults to the name of the working directory
    #[arg(short, long)]
    pub analysis: Option<String>,

    /// Name of the output tree, if it should be written
    #[arg(short, long)]
    pub outtree: Option<String>,

    /// Directory with template overrides (<slot>.j2 files)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Directory holding the example job configuration.
    /// Defaults to $SFRAME_DIR/user/config
    #[arg(long, value_name = "DIR")]
    pub examples: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments, or after
///   printing `--help` or `--version`
pub fn get_args() -> Args {
    Args::parse()
}

impl Args {
    /// Builds the generation request for a package rooted at `root`.
    ///
    /// Variables are read from the declaration file if one was given and from
    /// the data source otherwise. Without either, the cycle has no variables.
    pub fn to_request(
        &self,
        config: &Config,
        catalog: &dyn Catalog,
        root: &Path,
    ) -> Result<GenerationRequest> {
        let cycle = CycleName::parse(&self.name)?;
        let layout = Layout::discover(root);
        let class_name = cycle.class_name().to_string();

        let package = match self.analysis.clone().or_else(|| config.package.clone()) {
            Some(package) => package,
            None => {
                let package = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "MyAnalysis".to_string());
                info!("Using analysis name '{package}'");
                package
            }
        };

        let collection = match (&self.treename, &self.rootfile) {
            (Some(treename), _) => treename.clone(),
            (None, Some(rootfile)) => catalog
                .collection_name(rootfile)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            (None, None) => DEFAULT_COLLECTION.to_string(),
        };

        let declarations: Vec<Declaration> = match (&self.declarations, &self.rootfile) {
            (Some(path), _) => read_declarations(path)?,
            (None, Some(rootfile)) => catalog
                .fields(rootfile, Some(collection.as_str()))
                .into_iter()
                .map(Declaration::from)
                .collect(),
            (None, None) => Vec::new(),
        };
        if declarations.is_empty() {
            info!("No input variables declared");
        }

        let registration_path = match &self.linkdef {
            Some(linkdef) => linkdef.clone(),
            None => layout.registration_file()?,
        };

        let mut request = GenerationRequest::new(cycle).with_declarations(declarations);
        request.header_path = layout.include_dir.join(format!("{class_name}.h"));
        request.source_path = layout.source_dir.join(format!("{class_name}.cxx"));
        request.descriptor_path = layout.config_dir.join(format!("{class_name}_config.xml"));
        request.registration_path = registration_path;
        request.package = package;
        request.collection = collection;
        request.output_collection = self.outtree.clone();
        if let Some(rootfile) = &self.rootfile {
            request.input_source = rootfile.display().to_string();
        }
        Ok(request)
    }
}
