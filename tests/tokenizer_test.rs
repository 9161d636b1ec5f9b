use std::fs;

use cyclegen::classifier::is_container_type;
use cyclegen::declaration::{resolve_collisions, sanitize, Declaration};
use cyclegen::tokenizer::{read_declarations, Tokenizer};
use tempfile::TempDir;

fn names(declarations: &[Declaration]) -> Vec<&str> {
    declarations.iter().map(Declaration::name).collect()
}

#[test]
fn test_statements_are_returned_in_order() {
    let tokenizer = Tokenizer::new().unwrap();
    let declarations = tokenizer.parse("Int_t el_n;\nFloat_t el_eta;\nDouble_t MET;\nUInt_t RunNumber;\n");
    assert_eq!(names(&declarations), vec!["el_n", "el_eta", "MET", "RunNumber"]);
    assert_eq!(declarations[0].type_name(), "Int_t");
    assert!(!declarations[0].is_pointer());
    assert!(!declarations[0].is_commented());
}

#[test]
fn test_empty_and_unparsable_text() {
    let tokenizer = Tokenizer::new().unwrap();
    assert!(tokenizer.parse("").is_empty());
    assert!(tokenizer.parse("// just a note\nnothing to see here\n").is_empty());
}

#[test]
fn test_pointer_forms() {
    let tokenizer = Tokenizer::new().unwrap();
    let declarations = tokenizer.parse("Float_t *a;\nFloat_t* b;\nFloat_t*c;\nFloat_t d;");
    let pointers: Vec<bool> = declarations.iter().map(Declaration::is_pointer).collect();
    assert_eq!(pointers, vec![true, true, true, false]);
}

#[test]
fn test_repeated_semicolons_and_statements_on_one_line() {
    let tokenizer = Tokenizer::new().unwrap();
    let declarations = tokenizer.parse("double a;; int b ;");
    assert_eq!(names(&declarations), vec!["a", "b"]);
}

#[test]
fn test_commented_declarations() {
    let tokenizer = Tokenizer::new().unwrap();
    let declarations = tokenizer.parse("Int_t n; // Float_t x;\n/* Double_t y;\nDouble_t z; */\nUInt_t w;");
    let commented: Vec<(&str, bool)> =
        declarations.iter().map(|d| (d.name(), d.is_commented())).collect();
    assert_eq!(commented, vec![("n", false), ("x", true), ("y", true), ("z", true), ("w", false)]);
}

#[test]
fn test_every_statement_in_a_comment_is_disabled() {
    let tokenizer = Tokenizer::new().unwrap();
    let commented = |text: &str| -> Vec<(String, bool)> {
        tokenizer.parse(text).iter().map(|d| (d.name().to_string(), d.is_commented())).collect()
    };

    assert_eq!(
        commented("/* Float_t x; Float_t y; */\nInt_t n;"),
        vec![("x".to_string(), true), ("y".to_string(), true), ("n".to_string(), false)]
    );
    assert_eq!(
        commented("Int_t n; // Float_t x; Float_t y;"),
        vec![("n".to_string(), false), ("x".to_string(), true), ("y".to_string(), true)]
    );
    assert_eq!(
        commented("/* Float_t x;\nFloat_t y; Float_t z; */ Int_t n; Int_t m;"),
        vec![
            ("x".to_string(), true),
            ("y".to_string(), true),
            ("z".to_string(), true),
            ("n".to_string(), false),
            ("m".to_string(), false),
        ]
    );
}

#[test]
fn test_unterminated_block_comment_disables_the_rest() {
    let tokenizer = Tokenizer::new().unwrap();
    let declarations = tokenizer.parse("Int_t n;\n/* Float_t x;\nFloat_t y;\n");
    assert_eq!(names(&declarations), vec!["n", "x", "y"]);
    assert!(!declarations[0].is_commented());
    assert!(declarations[1..].iter().all(Declaration::is_commented));
}

#[test]
fn test_template_arguments() {
    let tokenizer = Tokenizer::new().unwrap();
    let declarations = tokenizer.parse(
        "std::vector<float>* el_pt;\nstd::map<int, std::vector<int> > m;\nstd::vector< std::string > names;",
    );
    assert_eq!(names(&declarations), vec!["el_pt", "m", "names"]);
    assert_eq!(declarations[0].type_name(), "std::vector<float>");
    assert_eq!(declarations[1].type_name(), "std::map<int, std::vector<int> >");
    assert_eq!(declarations[2].type_name(), "std::vector< std::string >");
    assert!(declarations.iter().all(Declaration::needs_reset));
    assert!(declarations.iter().all(Declaration::is_pointer));
}

#[test]
fn test_container_classification() {
    for type_name in [
        "std::vector<int>",
        "vector<float>",
        "std::list<double>",
        "std::set<int>",
        "std::unordered_set<int>",
        "std::map<int,int>",
        "std::vector <int>",
        "std::multiset<int>",
        "std::multimap<int,int>",
        "std::unordered_multimap<int,int>",
        "std::unordered_multiset<int>",
        "multimap<int,int>",
        "std::forward_list<int>",
    ] {
        assert!(is_container_type(type_name), "{type_name} should be a container");
    }
    for type_name in [
        "double",
        "UInt_t",
        "MyStruct",
        "MyVectorish<int>",
        "bitset<8>",
        "std::bitset<8>",
        "std::vector",
        "Premultiset<int>",
    ] {
        assert!(!is_container_type(type_name), "{type_name} should not be a container");
    }
}

#[test]
fn test_classified_declaration_is_pointer_and_reset() {
    let declaration = Declaration::new("v", "std::vector<int>", false, false);
    assert!(declaration.is_pointer());
    assert!(declaration.needs_reset());

    let declaration = Declaration::new("m", "std::multimap<int,int>", false, false);
    assert!(declaration.is_pointer());
    assert!(declaration.needs_reset());

    let declaration = Declaration::new("s", "MyStruct", true, false);
    assert!(declaration.is_pointer());
    assert!(!declaration.needs_reset());
}

#[test]
fn test_sanitize() {
    assert_eq!(sanitize("el_pt"), "el_pt");
    assert_eq!(sanitize("el.pt"), "el_pt");
    assert_eq!(sanitize("a-b c"), "a_b_c");
    assert_eq!(sanitize("1abc"), "_1abc");
    assert_eq!(sanitize(""), "_");
}

#[test]
fn test_sanitize_is_idempotent() {
    for name in ["el_pt", "el.pt", "1abc", "", "a-b c", "ü", "_x9"] {
        let once = sanitize(name);
        assert_eq!(sanitize(&once), once);
    }
}

#[test_log::test]
fn test_collisions_get_numeric_suffixes() {
    let declarations = resolve_collisions(vec![
        Declaration::new("el.pt", "Float_t", false, false),
        Declaration::new("el_pt", "Float_t", false, false),
        Declaration::new("el-pt", "Float_t", false, false),
        Declaration::new("a", "Int_t", false, false),
        Declaration::new("a_2", "Int_t", false, false),
        Declaration::new("a", "Int_t", false, false),
    ]);
    let sanitized: Vec<&str> = declarations.iter().map(Declaration::sanitized_name).collect();
    assert_eq!(sanitized, vec!["el_pt", "el_pt_2", "el_pt_3", "a", "a_2", "a_3"]);
    assert_eq!(declarations[1].name(), "el_pt");
}

#[test_log::test]
fn test_read_declarations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variables.h");
    fs::write(&path, "Int_t el_n;\n// Float_t MET;\nstd::vector<float>* el_pt;\n").unwrap();

    let declarations = read_declarations(&path).unwrap();
    assert_eq!(names(&declarations), vec!["el_n", "MET", "el_pt"]);
    assert!(declarations[1].is_commented());
}

#[test_log::test]
fn test_read_declarations_from_missing_file() {
    let dir = TempDir::new().unwrap();
    let declarations = read_declarations(dir.path().join("missing.h")).unwrap();
    assert!(declarations.is_empty());
}

#[test]
fn test_display() {
    let declaration = Declaration::new("el_pt", "std::vector<float>", true, true);
    assert_eq!(declaration.to_string(), "//std::vector<float> *el_pt");
}
