//! Job configuration for a generated cycle.
//!
//! Instead of writing a configuration from scratch, the example job
//! configuration shipped with the framework is adapted: the job, cycle,
//! library and package names are replaced and the input section is cut down
//! to a single input file and tree. The example is expected to have a fixed
//! structure. If it does not, no configuration is written.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::{debug, info};
use regex::Regex;

use crate::error::{Error, Result};
use crate::output::write_file;
use crate::request::GenerationRequest;

/// Example job configuration the descriptor is derived from.
pub const EXAMPLE_CONFIG: &str = "FirstCycle_config.xml";
/// Schema the job configurations are validated against.
pub const JOB_CONFIG_SCHEMA: &str = "JobConfig.dtd";
/// Environment variable pointing at the framework installation.
pub const FRAMEWORK_DIR_VAR: &str = "SFRAME_DIR";
/// Location of the examples inside the framework installation.
pub const EXAMPLES_SUBDIR: &str = "user/config";

/// Supplier of example files.
pub trait ExampleSource {
    /// Reads the example file `name`, or `None` if there is no such file.
    fn read(&self, name: &str) -> Result<Option<String>>;

    /// Human readable location of the examples, used in messages.
    fn location(&self) -> String;
}

/// Reads example files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryExampleSource {
    dir: PathBuf,
}

impl DirectoryExampleSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the examples of the framework installation named by `$SFRAME_DIR`.
    pub fn from_env() -> Option<Self> {
        let root = std::env::var_os(FRAMEWORK_DIR_VAR)?;
        Some(Self::new(PathBuf::from(root).join(EXAMPLES_SUBDIR)))
    }
}

impl ExampleSource for DirectoryExampleSource {
    fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Ok(None);
        }
        debug!("Reading example '{}'", path.display());
        Ok(Some(fs::read_to_string(path)?))
    }

    fn location(&self) -> String {
        format!("'{}'", self.dir.display())
    }
}

/// Element located in the descriptor text.
#[derive(Debug, Clone)]
struct Element {
    /// The start tag, or the whole element if it is self-closing.
    tag: Range<usize>,
    /// The whole element, up to and including its end tag.
    span: Range<usize>,
}

/// Tag-level editor for the job configuration text.
///
/// Elements are found by name outside of `<!-- -->` comments. Elements of the
/// same name are assumed not to nest. All offsets are recomputed after every
/// edit.
struct Descriptor {
    text: String,
    comment: Regex,
    start_tag: Regex,
    end_tag: Regex,
    /// Comment spans of the current text.
    comments: Vec<Range<usize>>,
}

impl Descriptor {
    fn new(text: &str) -> Result<Self> {
        let mut doc = Self {
            text: text.to_string(),
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            start_tag: Regex::new(r"<([A-Za-z_][A-Za-z0-9_.:-]*)(?:\s[^>]*)?/?>")?,
            end_tag: Regex::new(r"</([A-Za-z_][A-Za-z0-9_.:-]*)\s*>")?,
            comments: Vec::new(),
        };
        doc.scan_comments();
        Ok(doc)
    }

    fn scan_comments(&mut self) {
        self.comments = self.comment.find_iter(&self.text).map(|m| m.range()).collect();
    }

    /// Replaces `range` of the text and rescans the comments.
    fn edit(&mut self, range: Range<usize>, replacement: &str) {
        self.text.replace_range(range, replacement);
        self.scan_comments();
    }

    fn in_comment(&self, pos: usize) -> bool {
        self.comments.iter().any(|c| c.contains(&pos))
    }

    fn elements(&self, name: &str, within: Range<usize>) -> Result<Vec<Element>> {
        let scope = &self.text[within.clone()];
        let mut elements = Vec::new();
        for caps in self.start_tag.captures_iter(scope) {
            let (Some(found), Some(tag_name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if tag_name.as_str() != name {
                continue;
            }
            let tag = within.start + found.start()..within.start + found.end();
            if self.in_comment(tag.start) {
                continue;
            }
            if found.as_str().ends_with("/>") {
                elements.push(Element { span: tag.clone(), tag });
                continue;
            }
            let close = self
                .end_tag
                .captures_iter(&self.text[tag.end..])
                .filter_map(|caps| caps.get(0).zip(caps.get(1)))
                .filter(|(_, end_name)| end_name.as_str() == name)
                .map(|(m, _)| tag.end + m.end())
                .find(|&end| !self.in_comment(end - 1))
                .ok_or_else(|| malformed(format!("'{name}' element is never closed")))?;
            elements.push(Element { span: tag.start..close, tag });
        }
        Ok(elements)
    }

    /// The span of the first element along `path`, or the whole text.
    fn scope(&self, path: &[&str]) -> Result<Range<usize>> {
        let mut scope = 0..self.text.len();
        for name in path {
            scope = self
                .elements(name, scope)?
                .into_iter()
                .next()
                .map(|e| e.span)
                .ok_or_else(|| malformed(format!("no '{name}' element found")))?;
        }
        Ok(scope)
    }

    fn count(&self, path: &[&str], name: &str) -> Result<usize> {
        Ok(self.elements(name, self.scope(path)?)?.len())
    }

    fn first(&self, path: &[&str], name: &str) -> Result<Element> {
        self.elements(name, self.scope(path)?)?
            .into_iter()
            .next()
            .ok_or_else(|| malformed(format!("no '{name}' element found")))
    }

    /// Removes all but the first `name` element below `path`. Returns whether
    /// one is left.
    fn keep_first(&mut self, path: &[&str], name: &str) -> Result<bool> {
        loop {
            let found = self.elements(name, self.scope(path)?)?;
            match found.last() {
                Some(last) if found.len() > 1 => self.remove(last),
                _ => return Ok(!found.is_empty()),
            }
        }
    }

    fn remove_all(&mut self, path: &[&str], name: &str) -> Result<()> {
        while let Some(element) = self.elements(name, self.scope(path)?)?.into_iter().next() {
            self.remove(&element);
        }
        Ok(())
    }

    fn set_attributes(&mut self, element: &Element, attributes: &[(&str, &str)]) -> Result<()> {
        let mut tag = self.text[element.tag.clone()].to_string();
        for (name, value) in attributes {
            tag = set_attribute(&tag, name, value)?;
        }
        self.edit(element.tag.clone(), &tag);
        Ok(())
    }

    fn replace_attributes(&mut self, element: &Element, name: &str, attributes: &[(&str, &str)]) {
        let self_closing = self.text[element.tag.clone()].ends_with("/>");
        let mut tag = format!("<{name}");
        for (attribute, value) in attributes {
            tag.push_str(&format!(" {attribute}=\"{}\"", escape(value)));
        }
        tag.push_str(if self_closing { " />" } else { ">" });
        self.edit(element.tag.clone(), &tag);
    }

    /// Removes an element, together with its line if nothing else is on it.
    fn remove(&mut self, element: &Element) {
        let range = {
            let bytes = self.text.as_bytes();
            let mut start = element.span.start;
            while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
                start -= 1;
            }
            let mut end = element.span.end;
            while end < bytes.len() && matches!(bytes[end], b' ' | b'\t' | b'\r') {
                end += 1;
            }
            let own_line = (start == 0 || bytes[start - 1] == b'\n')
                && (end == bytes.len() || bytes[end] == b'\n');
            if own_line {
                start..(end + 1).min(bytes.len())
            } else {
                element.span.clone()
            }
        };
        self.edit(range, "");
    }
}

fn malformed<S: Into<String>>(reason: S) -> Error {
    Error::MalformedDescriptor { reason: reason.into() }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn attribute_pattern(name: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r#"(\s{}\s*=\s*)(?:"([^"]*)"|'([^']*)')"#, regex::escape(name)))?)
}

fn get_attribute(tag: &str, name: &str) -> Result<Option<String>> {
    Ok(attribute_pattern(name)?.captures(tag).and_then(|caps| {
        caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str().to_string())
    }))
}

/// Sets attribute `name` of the start tag `tag`, adding it if it is missing.
fn set_attribute(tag: &str, name: &str, value: &str) -> Result<String> {
    let pattern = attribute_pattern(name)?;
    let quoted = format!("\"{}\"", escape(value));
    if let Some(caps) = pattern.captures(tag) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        return Ok(format!("{}{}{}{}", &tag[..whole.start], prefix, quoted, &tag[whole.end..]));
    }

    let (head, close) = match tag.strip_suffix("/>") {
        Some(head) => (head, " />"),
        None => (tag.strip_suffix('>').unwrap_or(tag), ">"),
    };
    Ok(format!("{} {}={}{}", head.trim_end(), name, quoted, close))
}

/// Adapts the example job configuration `example` to the cycle in `request`.
///
/// # Errors
/// * `Error::MalformedDescriptor` if the example does not have exactly one
///   job configuration, cycle and user configuration, or lacks one of the
///   input elements that are rewritten
pub fn adapt_descriptor(example: &str, request: &GenerationRequest) -> Result<String> {
    let mut doc = Descriptor::new(example)?;
    let class_name = request.cycle.class_name();
    let package = request.package.as_str();

    for (name, path) in [
        ("JobConfiguration", &[][..]),
        ("Cycle", &["JobConfiguration"][..]),
        ("UserConfig", &["JobConfiguration", "Cycle"][..]),
    ] {
        let count = doc.count(path, name)?;
        if count != 1 {
            return Err(malformed(format!("expected exactly one '{name}' element, found {count}")));
        }
    }

    let job_name = format!("{class_name}Job");
    let job = doc.first(&[], "JobConfiguration")?;
    doc.set_attributes(&job, &[("JobName", job_name.as_str()), ("OutputLevel", "INFO")])?;

    rename_where(&mut doc, "Library", "libSFrameUser", &format!("lib{package}"))?;
    rename_where(&mut doc, "Package", "SFrameUser.par", &format!("{package}.par"))?;

    let cycle_path = ["JobConfiguration", "Cycle"];
    let cycle = doc.first(&["JobConfiguration"], "Cycle")?;
    let full_name = request.cycle.full_name();
    doc.set_attributes(&cycle, &[("Name", full_name.as_str()), ("RunMode", "LOCAL")])?;

    if !doc.keep_first(&cycle_path, "InputData")? {
        return Err(malformed("no 'InputData' element found"));
    }
    let input_data = doc.first(&cycle_path, "InputData")?;
    doc.replace_attributes(&input_data, "InputData", &[("Lumi", "1.0"), ("Version", "V1"), ("Type", "DATA")]);

    let input_path = ["JobConfiguration", "Cycle", "InputData"];
    if !doc.keep_first(&input_path, "In")? {
        return Err(malformed("no 'In' element found"));
    }
    let input = doc.first(&input_path, "In")?;
    doc.set_attributes(&input, &[("Lumi", "1.0"), ("FileName", request.input_source.as_str())])?;

    if !doc.keep_first(&input_path, "InputTree")? {
        return Err(malformed("no 'InputTree' element found"));
    }
    let tree = doc.first(&input_path, "InputTree")?;
    doc.set_attributes(&tree, &[("Name", request.collection.as_str())])?;

    doc.remove_all(&input_path, "MetadataOutputTree")?;

    let has_output = doc.keep_first(&input_path, "OutputTree")?;
    match (&request.output_collection, has_output) {
        (Some(output), true) => {
            let tree = doc.first(&input_path, "OutputTree")?;
            doc.set_attributes(&tree, &[("Name", output.as_str())])?;
        }
        (Some(_), false) => return Err(malformed("no 'OutputTree' element found")),
        (None, true) => doc.remove_all(&input_path, "OutputTree")?,
        (None, false) => {}
    }

    let user_config_path = ["JobConfiguration", "Cycle", "UserConfig"];
    if !doc.keep_first(&user_config_path, "Item")? {
        return Err(malformed("no 'Item' element found in 'UserConfig'"));
    }
    let item = doc.first(&user_config_path, "Item")?;
    doc.set_attributes(&item, &[("Name", "InTreeName"), ("Value", request.collection.as_str())])?;

    Ok(doc.text)
}

fn rename_where(doc: &mut Descriptor, element: &str, from: &str, to: &str) -> Result<()> {
    let count = doc.count(&[], element)?;
    for index in 0..count {
        let Some(found) = doc.elements(element, doc.scope(&[])?)?.into_iter().nth(index) else {
            break;
        };
        if get_attribute(&doc.text[found.tag.clone()], "Name")?.as_deref() == Some(from) {
            doc.set_attributes(&found, &[("Name", to)])?;
        }
    }
    Ok(())
}

/// Writes the adapted job configuration for `request`, reading the example
/// from `source`. Returns the path written to.
pub fn create_descriptor(
    source: &dyn ExampleSource,
    request: &GenerationRequest,
    write: impl FnOnce(&Path, &str) -> Result<()>,
) -> Result<PathBuf> {
    let example = source.read(EXAMPLE_CONFIG)?.ok_or_else(|| Error::MissingExample {
        name: EXAMPLE_CONFIG.to_string(),
        location: source.location(),
    })?;
    let descriptor = adapt_descriptor(&example, request)?;
    write(&request.descriptor_path, &descriptor)?;
    Ok(request.descriptor_path.clone())
}

/// Copies the job configuration schema into `config_dir` unless one is
/// already there. Returns whether a copy was made.
pub fn add_job_config_schema(source: &dyn ExampleSource, config_dir: &Path) -> Result<bool> {
    let target = config_dir.join(JOB_CONFIG_SCHEMA);
    if target.exists() {
        info!("Keeping existing {JOB_CONFIG_SCHEMA}");
        return Ok(false);
    }
    let schema = source.read(JOB_CONFIG_SCHEMA)?.ok_or_else(|| Error::MissingExample {
        name: JOB_CONFIG_SCHEMA.to_string(),
        location: source.location(),
    })?;
    write_file(&target, &schema)?;
    info!("Using a copy of {JOB_CONFIG_SCHEMA} from {}", source.location());
    Ok(true)
}
