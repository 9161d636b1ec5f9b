//! Recognition of standard container types.
//!
//! Container-typed variables are connected through pointers and their output
//! mirrors need to be cleared before every event.

/// Family keywords that mark a standard sequence, set or map container.
pub const CONTAINER_FAMILIES: [&str; 4] = ["vector", "list", "set", "map"];

/// Prefix of the set and map variants allowing duplicate keys.
const MULTI_PREFIX: &str = "multi";

/// Returns true if `type_name` names one of the recognized container families
/// followed by a template-argument group, e.g. `std::vector<int>`.
///
/// The keyword, or `multi` followed by `set` or `map`, has to start the type
/// or follow `:`, `_` or whitespace, so `std::unordered_set<int>` and
/// `std::multimap<int,int>` are recognized while `bitset<8>` and
/// `MyVectorish<int>` are not. Custom container types are never classified.
pub fn is_container_type(type_name: &str) -> bool {
    CONTAINER_FAMILIES.iter().any(|family| {
        type_name.match_indices(family).any(|(start, keyword)| {
            let before = &type_name[..start];
            let before = match *family {
                "set" | "map" => before.strip_suffix(MULTI_PREFIX).unwrap_or(before),
                _ => before,
            };
            let boundary = before
                .chars()
                .next_back()
                .map_or(true, |c| c == ':' || c == '_' || c.is_whitespace());
            boundary && opens_template_group(&type_name[start + keyword.len()..])
        })
    })
}

fn opens_template_group(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.starts_with('<') && rest[1..].contains('>')
}
