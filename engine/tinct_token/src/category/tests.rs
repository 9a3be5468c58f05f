use super::*;
use pretty_assertions::assert_eq;

#[test]
fn standard_constants_match_table() {
    for (index, entry) in STANDARD.iter().enumerate() {
        let category = Category::resolve(entry.path);
        assert_eq!(category.raw() as usize, index, "{}", entry.path);
    }
    assert_eq!(Category::KEYWORD_TYPE.path(), "Keyword.Type");
    assert_eq!(Category::STRING_DOUBLE.short_name(), "s2");
}

#[test]
fn resolve_is_idempotent() {
    let first = Category::resolve("Name.Function");
    let second = Category::resolve("Name.Function");
    assert_eq!(first, second);
    assert_eq!(first, Category::NAME_FUNCTION);
}

#[test]
fn separators_and_aliases() {
    assert_eq!(Category::resolve("Name::Function"), Category::NAME_FUNCTION);
    assert_eq!(Category::resolve("Str.Double"), Category::STRING_DOUBLE);
    assert_eq!(Category::resolve("String"), Category::STRING);
    assert_eq!(Category::resolve("Num.Hex"), Category::NUMBER_HEX);
    assert_eq!(Category::resolve("Token.Keyword"), Category::KEYWORD);
    assert_eq!(Category::resolve(" Keyword . Type "), Category::KEYWORD_TYPE);
}

#[test]
fn empty_path_is_root() {
    assert_eq!(Category::resolve(""), Category::ROOT);
    assert_eq!(Category::resolve("Token"), Category::ROOT);
    assert_eq!(Category::ROOT.parent(), None);
    assert_eq!(Category::ROOT.depth(), 0);
}

#[test]
fn dynamic_child_of_known_parent() {
    let magic = Category::resolve("Keyword.Magic");
    assert_eq!(magic.path(), "Keyword.Magic");
    assert_eq!(magic.name(), "Magic");
    assert_eq!(magic.parent(), Some(Category::KEYWORD));
    assert_eq!(magic.short_name(), "km");
    assert!(magic.is_a(Category::KEYWORD));
    assert!(!magic.is_a(Category::NAME));
}

#[test]
fn unknown_root_segment_hangs_under_other() {
    let bar = Category::resolve("Markup.Heading.Bar");
    let heading = Category::resolve("Markup.Heading");
    let markup = Category::resolve("Markup");

    assert_eq!(bar.parent(), Some(heading));
    assert_eq!(heading.parent(), Some(markup));
    assert_eq!(markup.parent(), Some(Category::OTHER));
    assert!(bar.is_a(Category::OTHER));
    assert!(bar.is_a(Category::ROOT));
    assert_eq!(markup.short_name(), "xm");
    assert_eq!(bar.short_name(), "xmhb");
}

#[test]
fn ancestors_walk_to_root() {
    let chain: Vec<_> = Category::NUMBER_INTEGER_LONG
        .ancestors()
        .map(Category::path)
        .collect();
    assert_eq!(
        chain,
        vec![
            "Literal.Number.Integer.Long",
            "Literal.Number.Integer",
            "Literal.Number",
            "Literal",
            "Token",
        ]
    );
    assert_eq!(Category::NUMBER_INTEGER_LONG.depth(), 4);
}

#[test]
fn is_a_is_reflexive() {
    assert!(Category::COMMENT.is_a(Category::COMMENT));
    assert!(Category::COMMENT_SINGLE.is_a(Category::COMMENT));
    assert!(!Category::COMMENT.is_a(Category::COMMENT_SINGLE));
}

#[test]
fn concurrent_resolution_agrees() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| Category::resolve("Concurrent.Probe.Leaf")))
        .collect();
    let results: Vec<Category> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn display_uses_path() {
    assert_eq!(Category::NAME_TAG.to_string(), "Name.Tag");
    assert_eq!(format!("{:?}", Category::PUNCTUATION), "Punctuation");
}

#[cfg(feature = "serde")]
#[test]
fn serde_uses_path() {
    let json = serde_json::to_string(&Category::OPERATOR_WORD).unwrap();
    assert_eq!(json, "\"Operator.Word\"");
    let back: Category = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Category::OPERATOR_WORD);
}
