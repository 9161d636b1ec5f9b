//! Text templates the generated files are built from.
//!
//! Every template is a MiniJinja template. The defaults produce an SFrame
//! cycle; each of them can be replaced by a `<slot>.j2` file in a templates
//! directory.

use std::path::Path;

use log::debug;

use crate::error::Result;

/// Extension of template override files.
pub const TEMPLATE_EXTENSION: &str = "j2";

const NAMESPACE: &str = "namespace {{ namespace }} {\n\n{{ body }}\n} // of namespace {{ namespace }}\n";

const HEADER_BODY: &str = r#"
/**
 *    @short Put short description of class here
 *
 *          Put a longer description over here...
 *
 *  @author Put your name here
 * @version $Revision: 173 $
 */
class {{ class }} : public SCycleBase {

public:
    /// Default constructor
    {{ class }}();
    /// Default destructor
    ~{{ class }}();

    /// Function called at the beginning of the cycle
    virtual void BeginCycle() throw( SError );
    /// Function called at the end of the cycle
    virtual void EndCycle() throw( SError );

    /// Function called at the beginning of a new input data
    virtual void BeginInputData( const SInputData& ) throw( SError );
    /// Function called after finishing to process an input data
    virtual void EndInputData  ( const SInputData& ) throw( SError );

    /// Function called after opening each new input file
    virtual void BeginInputFile( const SInputData& ) throw( SError );

    /// Function called for every event
    virtual void ExecuteEvent( const SInputData&, Double_t ) throw( SError );

private:
    //
    // Put all your private variables here
    //
    string InTreeName;

    // Input Variables
{{ input_declarations }}

    // Output Variables
{{ output_declarations }}

    // Macro adding the functions for dictionary generation
    ClassDef( {{ full_class_name }}, 0 );

}; // class {{ class }}
"#;

const HEADER_FRAME: &str = r#"// Dear emacs, this is -*- c++ -*-
#ifndef {{ guard }}
#define {{ guard }}

// SFrame include(s):
#include "core/include/SCycleBase.h"
#include <vector>
#include <string>
using namespace std;

{{ body }}

#endif // {{ guard }}

"#;

const SOURCE_BODY: &str = r#"
{{ class }}::{{ class }}()
    : SCycleBase() {

    DeclareProperty( "InTreeName", InTreeName );
    SetLogName( GetName() );
}

{{ class }}::~{{ class }}() {

}

void {{ class }}::BeginCycle() throw( SError ) {

    return;

}

void {{ class }}::EndCycle() throw( SError ) {

    return;

}

void {{ class }}::BeginInputData( const SInputData& ) throw( SError ) {

{{ output_connections }}
    return;

}

void {{ class }}::EndInputData( const SInputData& ) throw( SError ) {

    return;

}

void {{ class }}::BeginInputFile( const SInputData& ) throw( SError ) {

{{ input_connections }}
    return;

}

void {{ class }}::ExecuteEvent( const SInputData&, Double_t ) throw( SError ) {

{{ output_resets }}

    // The main part of your analysis goes here

{{ output_fills }}

    return;

}
"#;

const SOURCE_FRAME: &str = r#"
// Local include(s):
#include "{{ header }}"

ClassImp( {{ full_class_name }} );

{{ body }}
"#;

const REGISTRATION_FILE: &str = r#"// Dear emacs, this is -*- c++ -*-

#ifdef __CINT__

#pragma link off all globals;
#pragma link off all classes;
#pragma link off all functions;
#pragma link C++ nestedclass;

{{ registration_lines }}
#endif // __CINT__
"#;

const REGISTRATION_ENTRY: &str = "#pragma link C++ class {{ name }}+;\n";

const INPUT_DECLARATION: &str =
    "{{ tab }}{{ comment }}{{ type_name }}\t{{ pointer }}{{ cname }};\n";
const OUTPUT_DECLARATION: &str = "{{ tab }}{{ comment }}{{ type_name }}\t{{ output_name }};\n";
const INPUT_CONNECTION: &str =
    "{{ tab }}{{ comment }}ConnectVariable( InTreeName.c_str(), \"{{ name }}\", {{ cname }} );\n";
const OUTPUT_CONNECTION: &str =
    "{{ tab }}{{ comment }}DeclareVariable( {{ output_name }}, \"{{ name }}\" );\n";
const OUTPUT_RESET: &str = "{{ tab }}{{ comment }}{{ output_name }}.clear();\n";
const OUTPUT_FILL: &str = "{{ tab }}{{ comment }}{{ output_name }} = {{ pointer }}{{ cname }};\n";

/// The full set of templates used for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub namespace: String,
    pub header_body: String,
    pub header_frame: String,
    pub source_body: String,
    pub source_frame: String,
    pub registration_file: String,
    pub registration_entry: String,
    pub input_declaration: String,
    pub output_declaration: String,
    pub input_connection: String,
    pub output_connection: String,
    pub output_reset: String,
    pub output_fill: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            namespace: NAMESPACE.to_string(),
            header_body: HEADER_BODY.to_string(),
            header_frame: HEADER_FRAME.to_string(),
            source_body: SOURCE_BODY.to_string(),
            source_frame: SOURCE_FRAME.to_string(),
            registration_file: REGISTRATION_FILE.to_string(),
            registration_entry: REGISTRATION_ENTRY.to_string(),
            input_declaration: INPUT_DECLARATION.to_string(),
            output_declaration: OUTPUT_DECLARATION.to_string(),
            input_connection: INPUT_CONNECTION.to_string(),
            output_connection: OUTPUT_CONNECTION.to_string(),
            output_reset: OUTPUT_RESET.to_string(),
            output_fill: OUTPUT_FILL.to_string(),
        }
    }
}

impl Templates {
    /// Names of all template slots, as used for override file names.
    pub const SLOTS: [&'static str; 13] = [
        "namespace",
        "header_body",
        "header_frame",
        "source_body",
        "source_frame",
        "registration_file",
        "registration_entry",
        "input_declaration",
        "output_declaration",
        "input_connection",
        "output_connection",
        "output_reset",
        "output_fill",
    ];

    /// Returns the default templates with every slot that has a
    /// `<slot>.j2` file in `dir` replaced by that file's content.
    pub fn with_overrides<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut templates = Self::default();
        for slot in Self::SLOTS {
            let path = dir.join(format!("{slot}.{TEMPLATE_EXTENSION}"));
            if !path.is_file() {
                continue;
            }
            debug!("Using template override '{}'", path.display());
            if let Some(template) = templates.slot_mut(slot) {
                *template = std::fs::read_to_string(&path)?;
            }
        }
        Ok(templates)
    }

    fn slot_mut(&mut self, slot: &str) -> Option<&mut String> {
        let template = match slot {
            "namespace" => &mut self.namespace,
            "header_body" => &mut self.header_body,
            "header_frame" => &mut self.header_frame,
            "source_body" => &mut self.source_body,
            "source_frame" => &mut self.source_frame,
            "registration_file" => &mut self.registration_file,
            "registration_entry" => &mut self.registration_entry,
            "input_declaration" => &mut self.input_declaration,
            "output_declaration" => &mut self.output_declaration,
            "input_connection" => &mut self.input_connection,
            "output_connection" => &mut self.output_connection,
            "output_reset" => &mut self.output_reset,
            "output_fill" => &mut self.output_fill,
            _ => return None,
        };
        Some(template)
    }
}
