//! Integration tests for tree construction.

use thicket_common::Location;
use thicket_dom::{NodeKind, Tag};
use thicket_html::{EntityIssue, ErrorKind, parse};

fn warning_kinds(input: &str) -> Vec<ErrorKind> {
    parse(input.as_bytes())
        .warnings
        .into_iter()
        .map(|w| w.kind)
        .collect()
}

#[test]
fn test_single_element() {
    let parsed = parse(b"<a>x</a>");
    assert!(parsed.is_ok());
    assert!(parsed.warnings.is_empty());

    let document = &parsed.document;
    assert_eq!(document.kind, NodeKind::Document);
    assert_eq!(document.children.len(), 1);

    let a = &document.children[0];
    assert_eq!(a.kind, NodeKind::Element);
    assert_eq!(a.content, "a");
    assert_eq!(a.children.len(), 1);
    assert_eq!(a.children[0].kind, NodeKind::Text);
    assert_eq!(a.children[0].content, "x");
}

#[test]
fn test_void_element_is_a_leaf() {
    let parsed = parse(b"<br><p>x</p>");
    assert!(parsed.warnings.is_empty());

    let children = &parsed.document.children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].content, "br");
    assert!(children[0].children.is_empty());
    assert_eq!(children[1].content, "p");
    assert_eq!(children[1].text(), "x");
}

#[test]
fn test_self_closing_void_element() {
    let parsed = parse(b"<p>a<br/>b</p>");
    assert!(parsed.warnings.is_empty());
    let p = parsed.document.find("p");
    assert_eq!(p.children.len(), 3);
    assert_eq!(p.children[1].content, "br");
}

#[test]
fn test_self_closing_non_void_element_stays_open() {
    let parsed = parse(b"<div/><p>x</p>");
    assert!(parsed.is_ok());

    let children = &parsed.document.children;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].content, "div");
    assert_eq!(children[0].children.len(), 1);
    assert_eq!(children[0].children[0].content, "p");
    assert_eq!(children[0].find("p").text(), "x");

    assert_eq!(
        warning_kinds("<div/><p>x</p>"),
        vec![ErrorKind::UnclosedTag {
            name: "div".to_string()
        }]
    );
}

#[test]
fn test_mismatched_closing_tags_are_dropped() {
    let parsed = parse(b"<a><b>x</c></a>");
    assert!(parsed.is_ok());
    assert_eq!(
        warning_kinds("<a><b>x</c></a>"),
        vec![
            ErrorKind::TagMismatch {
                expected: "b".to_string(),
                found: "c".to_string(),
            },
            ErrorKind::TagMismatch {
                expected: "b".to_string(),
                found: "a".to_string(),
            },
            ErrorKind::UnclosedTag {
                name: "b".to_string(),
            },
        ]
    );

    // the tree is still complete
    let b = parsed.document.find("a").find("b");
    assert!(!b.is_invalid());
    assert_eq!(b.text(), "x");
}

#[test]
fn test_stray_closing_tag_at_root() {
    assert_eq!(
        warning_kinds("</p><a></a>"),
        vec![ErrorKind::TagMismatch {
            expected: String::new(),
            found: "p".to_string(),
        }]
    );
}

#[test]
fn test_script_body_is_literal() {
    let parsed = parse(b"<script>1 < 2 & more</script>");
    assert!(parsed.is_ok());
    assert!(parsed.warnings.is_empty());

    let script = parsed.document.find("script");
    assert_eq!(script.children.len(), 1);
    assert_eq!(script.children[0].kind, NodeKind::Text);
    assert_eq!(script.children[0].content, "1 < 2 & more");
}

#[test]
fn test_pre_body_is_not_entity_expanded() {
    let parsed = parse(b"<pre>&amp;</pre>");
    assert_eq!(parsed.document.find("pre").text(), "&amp;");
}

#[test]
fn test_find_missing_returns_invalid() {
    let parsed = parse(b"<div><p>x</p></div>");
    let missing = parsed.document.find("missing");
    assert!(missing.is_invalid());
    assert_eq!(missing.kind, NodeKind::Invalid);
    assert!(parsed.document.find("div").find("span").find("a").is_invalid());
}

#[test]
fn test_attributes() {
    let parsed = parse(br#"<div id="main" class='c' data-x=1 hidden>x</div>"#);
    let div = parsed.document.find("div");
    assert_eq!(div.attr("id"), Some("main"));
    assert_eq!(div.attr("class"), Some("c"));
    assert_eq!(div.attr("data-x"), Some("1"));
    assert_eq!(div.attr("hidden"), Some(""));
    assert_eq!(div.attr("missing"), None);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_attribute_whitespace_around_equals() {
    let parsed = parse(br#"<a x = "v" y= z>t</a>"#);
    let a = parsed.document.find("a");
    assert_eq!(a.attr("x"), Some("v"));
    assert_eq!(a.attr("y"), Some("z"));
}

#[test]
fn test_forgotten_value_becomes_next_key() {
    let parsed = parse(b"<a x= y=z>t</a>");
    let a = parsed.document.find("a");
    assert_eq!(a.attr("x"), Some(""));
    assert_eq!(a.attr("y"), Some("z"));
}

#[test]
fn test_attribute_entities_are_expanded() {
    let parsed = parse(br#"<a title="a &amp; b">t</a>"#);
    assert_eq!(parsed.document.find("a").attr("title"), Some("a & b"));
}

#[test]
fn test_attribute_entity_warning_location() {
    let parsed = parse(br#"<a t="&zz;">x</a>"#);
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].loc, Location { line: 1, col: 7, offset: 6 });
    assert_eq!(
        parsed.warnings[0].kind,
        ErrorKind::InvalidEntity(EntityIssue::NoMatch)
    );
    assert_eq!(parsed.document.find("a").attr("t"), Some("&zz;"));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let parsed = parse(br#"<a href="1" href="2">x</a>"#);
    assert!(parsed.is_ok());
    assert_eq!(parsed.document.find("a").attr("href"), Some("1"));
    assert_eq!(
        warning_kinds(r#"<a href="1" href="2">x</a>"#),
        vec![ErrorKind::DuplicateAttribute {
            key: "href".to_string()
        }]
    );
}

#[test]
fn test_find_tag_by_attributes() {
    let parsed = parse(b"<div><a href=x>1</a><a href=y id=z>2</a></div>");
    let tag = Tag::new("a").with_attr("href", "y");
    assert_eq!(parsed.document.find_tag(&tag).text(), "2");
    assert_eq!(parsed.document.find_tag_all(&Tag::new("a"), false).len(), 2);
}

#[test]
fn test_value_without_key_is_dropped() {
    let parsed = parse(b"<a b= =c>x</a>");
    assert!(parsed.is_ok());

    let a = parsed.document.find("a");
    assert_eq!(a.attrs.len(), 1);
    assert_eq!(a.attr("b"), Some(""));
    assert_eq!(a.attr(""), None);

    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].kind, ErrorKind::EmptyAttributeKey);
    assert_eq!(parsed.warnings[0].loc, Location { line: 1, col: 7, offset: 6 });
}

#[test]
fn test_closing_tag_case_is_ignored() {
    let parsed = parse(b"<P>x</P>");
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.document.find("p").text(), "x");
}

#[test]
fn test_vertical_tab_is_trimmed() {
    let parsed = parse(b"<!--\x0Bnote\x0B--></\x0B>");
    let fatal = parsed.fatal.expect("closing tag with only whitespace is fatal");
    assert_eq!(fatal.kind, ErrorKind::EmptyContent { context: "closing tag" });
    assert_eq!(parsed.document.children[0].content, "note");
}

#[test]
fn test_tag_names_are_lower_cased() {
    let parsed = parse(b"<DIV>x</Div>");
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.document.children[0].content, "div");
}

#[test]
fn test_text_keeps_whitespace_and_expands_entities() {
    let parsed = parse(b"<p>  a &lt; b  </p>");
    assert_eq!(parsed.document.find("p").children[0].content, "  a < b  ");
}

#[test]
fn test_text_entity_warning() {
    let parsed = parse(b"<p>a &bogus; b</p>");
    assert!(parsed.is_ok());
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].to_string(), "1:6: invalid entity: no matching entity");
    assert_eq!(parsed.document.find("p").text(), "a &bogus; b");
}

#[test]
fn test_comment_and_declaration_are_trimmed() {
    let parsed = parse(b"<!DOCTYPE html><!-- note --><html></html>");
    let children = &parsed.document.children;
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].kind, NodeKind::Declaration);
    assert_eq!(children[0].content, "DOCTYPE html");
    assert_eq!(children[1].kind, NodeKind::Comment);
    assert_eq!(children[1].content, "note");
    assert_eq!(children[2].content, "html");
}

#[test]
fn test_empty_content_is_fatal() {
    for (input, context) in [
        ("<!---->", "comment"),
        ("<!   >", "declaration"),
        ("<>", "opening tag"),
        ("</ >", "closing tag"),
    ] {
        let parsed = parse(input.as_bytes());
        let fatal = parsed.fatal.expect("empty construct is fatal");
        assert_eq!(fatal.kind, ErrorKind::EmptyContent { context }, "{input}");
        assert!(fatal.is_fatal());
        assert_eq!(parsed.document.kind, NodeKind::Document);
    }
}

#[test]
fn test_node_locations() {
    let parsed = parse(b"<a>\n<b>x</b></a>");
    let a = parsed.document.find("a");
    assert_eq!(a.loc, Location::START);
    assert_eq!(a.children[0].content, "\n");
    let b = a.find("b");
    assert_eq!(b.loc, Location { line: 2, col: 1, offset: 4 });
    assert_eq!(b.children[0].loc, Location { line: 2, col: 4, offset: 7 });
}

#[test]
fn test_trailing_whitespace_is_ignored() {
    let parsed = parse(b"<p>x</p>\n\n");
    assert!(parsed.is_ok());
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].kind, ErrorKind::TrailingWhitespace);
    assert_eq!(parsed.document.children.len(), 1);
}

#[test]
fn test_empty_input() {
    let parsed = parse(b"");
    assert!(!parsed.is_ok());
    assert_eq!(parsed.fatal.as_ref().unwrap().kind, ErrorKind::EmptyInput);
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.document.kind, NodeKind::Document);
    assert!(parsed.document.children.is_empty());
}

#[test]
fn test_fatal_eof_keeps_partial_tree() {
    let parsed = parse(b"<div><p>hello");
    let fatal = parsed.fatal.as_ref().unwrap();
    assert_eq!(fatal.kind, ErrorKind::UnexpectedEof { context: "text" });
    assert_eq!(fatal.to_string(), "1:9: error lexing text: unexpected EOF");

    assert!(!parsed.document.find("div").find("p").is_invalid());
    assert_eq!(
        parsed.warnings.last().map(|w| &w.kind),
        Some(&ErrorKind::UnclosedTag {
            name: "p".to_string()
        })
    );
}

#[test]
fn test_into_result() {
    let document = parse(b"<a>x</a>").into_result().unwrap();
    assert_eq!(document.find("a").text(), "x");

    let err = parse(b"<a").into_result().unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedEof { context: "opening tag" });
}

#[test]
fn test_unclosed_elements_are_attached() {
    let parsed = parse(b"<html><body><div>x");
    // lexing fails on the trailing text, but the open elements still form a tree
    assert!(!parsed.is_ok());
    let div = parsed.document.find("html").find("body").find("div");
    assert!(!div.is_invalid());

    let parsed = parse(b"<html><body><div>x</div>");
    assert!(parsed.is_ok());
    assert_eq!(
        parsed.warnings[0].kind,
        ErrorKind::UnclosedTag {
            name: "body".to_string()
        }
    );
    assert_eq!(parsed.document.find("div").text(), "x");
}
