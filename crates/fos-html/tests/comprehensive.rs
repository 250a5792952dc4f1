//! Comprehensive tests for fos-html
//!
//! Tests parsing of template-shaped markup into fos-dom nodes.

use fos_html::{Node, ParseError, XmlParser, parse};

#[test]
fn test_parse_empty() {
    let nodes = parse("").unwrap();
    assert!(nodes.is_empty());
}

#[test]
fn test_parse_text_only() {
    let nodes = parse("Hello World").unwrap();
    assert_eq!(nodes, vec![Node::text("Hello World")]);
}

#[test]
fn test_parse_multiple_roots() {
    let nodes = parse("<b>One</b><b>Two</b>").unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].text_content(), "Two");
}

#[test]
fn test_parse_nested_structure() {
    let markup = r#"
        <main>
            <section class="intro">
                <h1>Welcome</h1>
                <ul>
                    <li>Item 1</li>
                    <li>Item 2</li>
                </ul>
            </section>
        </main>
    "#;

    let nodes = parse(markup).unwrap();
    let main = nodes.iter().find(|n| n.is_element()).unwrap();
    let section = main.children().iter().find(|n| n.is_element()).unwrap();
    assert_eq!(section.as_element().unwrap().get_attr("class"), Some("intro"));

    // Whitespace between elements is preserved as text
    assert!(main.children().iter().any(Node::is_text));
}

#[test]
fn test_parse_self_closing_tags() {
    let nodes = parse(r#"<div><br/><img src="test.png"/></div>"#).unwrap();
    let div = nodes[0].as_element().unwrap();
    assert_eq!(div.children.len(), 2);
    assert_eq!(div.children[1].as_element().unwrap().get_attr("src"), Some("test.png"));
}

#[test]
fn test_parse_attribute_order_preserved() {
    let nodes = parse(r#"<a id="x" href="/y" class="z"/>"#).unwrap();
    let names: Vec<_> = nodes[0].as_element().unwrap().attrs.iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, ["id", "href", "class"]);
}

#[test]
fn test_parse_prefixed_tag_uses_local_name() {
    let nodes = parse(r##"<svg:rect xlink:href="#a"></svg:rect>"##).unwrap();
    let rect = nodes[0].as_element().unwrap();
    assert_eq!(rect.name, "rect");
    assert_eq!(rect.get_attr("xlink:href"), Some("#a"));
}

#[test]
fn test_parse_cdata_is_text() {
    let nodes = parse("<p><![CDATA[a < b]]></p>").unwrap();
    assert_eq!(nodes[0].children(), &[Node::text("a < b")]);
}

#[test]
fn test_parse_processing_instruction() {
    let nodes = parse("<?render fast?>").unwrap();
    assert_eq!(
        nodes[0],
        Node::ProcessingInstruction { target: "render".into(), data: "fast".into() }
    );
}

#[test]
fn test_markers_survive_in_attributes_and_text() {
    let nodes = parse(r#"<div class="[[[0]]] bar">[[[1]]]</div>"#).unwrap();
    let div = nodes[0].as_element().unwrap();
    assert_eq!(div.get_attr("class"), Some("[[[0]]] bar"));
    assert_eq!(div.children, vec![Node::text("[[[1]]]")]);
}

#[test]
fn test_parse_errors_display() {
    let err = parse("<div><p></div>").unwrap_err();
    assert_eq!(err.to_string(), "Mismatched end tag: expected </p>, found </div>");

    let err = parse("<div>").unwrap_err();
    assert_eq!(err.to_string(), "Unclosed tag: <div>");
}

#[test]
fn test_unexpected_end_tag() {
    let err = parse("text</p>").unwrap_err();
    assert_eq!(err, ParseError::UnexpectedEndTag { tag: "p".into() });
    assert_eq!(err.to_string(), "Unexpected end tag: </p>");

    let err = parse("<a></a></svg:g>").unwrap_err();
    assert_eq!(err, ParseError::UnexpectedEndTag { tag: "g".into() });

    let lenient = XmlParser::new().allow_void_elements(true);
    let err = lenient.parse_fragment("<br></b>").unwrap_err();
    assert_eq!(err, ParseError::UnexpectedEndTag { tag: "b".into() });
}

#[test]
fn test_tokenizer_error() {
    let err = parse(r#"<div class="a" class="b"></div>"#).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "got {err:?}");
}

#[test]
fn test_lenient_void_round_trip() {
    let rendered = r#"<img src="foo.jpg"><i>Hello, </i><br>"#;
    let nodes = XmlParser::new().allow_void_elements(true).parse_fragment(rendered).unwrap();
    let html: String = nodes.iter().map(Node::outer_html).collect();
    assert_eq!(html, rendered);
}
