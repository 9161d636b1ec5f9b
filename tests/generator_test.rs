use std::path::Path;

use cyclegen::config::CodeStyle;
use cyclegen::declaration::Declaration;
use cyclegen::generator::{indent, CycleGenerator};
use cyclegen::paths::include_path;
use cyclegen::renderer::MiniJinjaRenderer;
use cyclegen::request::{CycleName, GenerationRequest};
use cyclegen::templates::Templates;

fn request(name: &str, output: Option<&str>) -> GenerationRequest {
    let mut request = GenerationRequest::new(CycleName::parse(name).unwrap()).with_declarations(vec![
        Declaration::new("el_n", "Int_t", false, false),
        Declaration::new("el_pt", "std::vector<float>", true, false),
        Declaration::new("MET_Et", "Float_t", false, true),
        Declaration::new("el_eta", "std::vector<float>", true, false),
    ]);
    request.output_collection = output.map(str::to_string);
    request
}

#[test]
fn test_header_declares_every_variable() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);

    let header = generator.header(&request("Ns::MyCycle", Some("physics_out"))).unwrap();
    assert!(header.contains("#ifndef NS_MYCYCLE_H"));
    assert!(header.contains("#define NS_MYCYCLE_H"));
    assert!(header.contains("namespace Ns {"));
    assert!(header.contains("class MyCycle : public SCycleBase {"));
    assert!(header.contains("ClassDef( Ns::MyCycle, 0 );"));
    assert!(header.contains("Int_t\tel_n;"));
    assert!(header.contains("std::vector<float>\t*el_pt;"));
    assert!(header.contains("//Float_t\tMET_Et;"));
    assert!(header.contains("Int_t\tout_el_n;"));
    assert!(header.contains("std::vector<float>\tout_el_pt;"));
    assert!(!header.contains("{{"));
}

#[test]
fn test_header_without_namespace_or_output() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);

    let header = generator.header(&request("MyCycle", None)).unwrap();
    assert!(header.contains("#ifndef MYCYCLE_H"));
    assert!(!header.contains("} // of namespace"));
    assert!(header.contains("    Int_t\tel_n;\n"));
    assert!(!header.contains("out_"));
}

#[test]
fn test_source_connects_and_fills_variables() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);

    let source = generator
        .source(&request("MyCycle", Some("physics_out")), "../include/MyCycle.h")
        .unwrap();
    assert!(source.contains("#include \"../include/MyCycle.h\""));
    assert!(source.contains("ClassImp( MyCycle );"));
    assert!(source.contains("ConnectVariable( InTreeName.c_str(), \"el_n\", el_n );"));
    assert!(source.contains("//ConnectVariable( InTreeName.c_str(), \"MET_Et\", MET_Et );"));
    assert!(source.contains("DeclareVariable( out_el_pt, \"el_pt\" );"));
    assert!(source.contains("out_el_n = el_n;"));
    assert!(source.contains("out_el_pt = *el_pt;"));

    assert_eq!(source.matches(".clear();").count(), 2);
    assert!(!source.contains("out_el_n.clear();"));
    let reset = source.find("out_el_pt.clear();").unwrap();
    let fill = source.find("out_el_pt = *el_pt;").unwrap();
    assert!(reset < fill);
}

#[test]
fn test_source_without_output() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);

    let source = generator.source(&request("MyCycle", None), "MyCycle.h").unwrap();
    assert!(source.contains("ConnectVariable( InTreeName.c_str(), \"el_pt\", el_pt );"));
    assert!(!source.contains("DeclareVariable"));
    assert!(!source.contains("out_"));
}

#[test]
fn test_empty_request_keeps_the_sections() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);
    let request = GenerationRequest::new(CycleName::parse("AnalysisCycle").unwrap());

    let header = generator.header(&request).unwrap();
    assert!(header.contains("// Input Variables"));
    assert!(header.contains("// Output Variables"));
    assert!(header.contains("ClassDef( AnalysisCycle, 0 );"));
    assert!(!header.contains("{{"));

    let source = generator.source(&request, "AnalysisCycle.h").unwrap();
    assert!(source.contains("void AnalysisCycle::BeginInputFile( const SInputData& ) throw( SError ) {"));
    assert!(source.contains("void AnalysisCycle::ExecuteEvent( const SInputData&, Double_t ) throw( SError ) {"));
    assert!(!source.contains("ConnectVariable"));
    assert!(!source.contains("{{"));
}

#[test]
fn test_names_are_escaped_in_literals() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);
    let request = GenerationRequest::new(CycleName::parse("MyCycle").unwrap())
        .with_declarations(vec![Declaration::new("el.pt", "Float_t", false, false)]);

    let source = generator.source(&request, "MyCycle.h").unwrap();
    assert!(source.contains("ConnectVariable( InTreeName.c_str(), \"el.pt\", el_pt );"));
}

#[test]
fn test_custom_code_style() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle { indent: "\t".to_string(), disable_marker: "// ".to_string() };
    let generator = CycleGenerator::new(&renderer, &templates, &style);

    let header = generator.header(&request("MyCycle", None)).unwrap();
    assert!(header.contains("\t// Float_t\tMET_Et;\n"));
}

#[test]
fn test_registration_lines_are_unique_and_ordered() {
    let renderer = MiniJinjaRenderer::new();
    let templates = Templates::default();
    let style = CodeStyle::default();
    let generator = CycleGenerator::new(&renderer, &templates, &style);

    let lines = generator.registration_lines(&request("Ns::MyCycle", None)).unwrap();
    assert_eq!(
        lines,
        vec![
            "#pragma link C++ class Ns::MyCycle+;".to_string(),
            "#pragma link C++ class std::vector<float>+;".to_string(),
        ]
    );

    let file = generator.registration_file(&lines).unwrap();
    assert!(file.contains("#pragma link C++ class Ns::MyCycle+;\n#pragma link C++ class std::vector<float>+;\n"));
    assert_eq!(file.lines().filter(|l| l.starts_with("#endif")).count(), 1);
}

#[test]
fn test_indent_skips_blank_lines() {
    assert_eq!(indent("a\n\n  \nb\n", "  "), "  a\n\n  \n  b\n");
    assert_eq!(indent("", "  "), "");
}

#[test]
fn test_include_path() {
    assert_eq!(
        include_path(Path::new("/a/b/include/X.h"), Path::new("/a/b/src/X.cxx")),
        "../include/X.h"
    );
    assert_eq!(include_path(Path::new("/a/X.h"), Path::new("/a/X.cxx")), "X.h");
    assert_eq!(
        include_path(Path::new("/a/include/sub/X.h"), Path::new("/a/src/deep/X.cxx")),
        "../../include/sub/X.h"
    );
    assert_eq!(include_path(Path::new("/x/include/X.h"), Path::new("/y/src/X.cxx")), "/x/include/X.h");
}
