//! DOM backend tests for fos-jsx

use fos_dom::{ElementData, HtmlSerializer, Node};
use fos_jsx::{ClassMap, Rendered, Value, fragments, jsx_to_dom, jsx_to_dom_with};

fn render_dom(rendered: fos_jsx::Result<Rendered<Node>>) -> Node {
    rendered.unwrap().into_ready().expect("synchronous template")
}

#[test]
fn test_element_with_attributes_and_text() {
    let node = render_dom(jsx_to_dom(
        &fragments!(r#"<div class=""#, r#" bar">Hello, "#, "</div>"),
        &[Value::from("foo"), Value::from("world")],
    ));

    let div = node.as_element().expect("element root");
    assert_eq!(div.name, "div");
    assert_eq!(div.get_attr("class"), Some("foo bar"));
    assert_eq!(node.text_content(), "Hello, world");
    assert_eq!(node.outer_html(), r#"<div class="foo bar">Hello, world</div>"#);
}

#[test]
fn test_static_markup_becomes_nodes() {
    let node = render_dom(jsx_to_dom(
        &fragments!(r#"<img src="foo.jpg"/><i>Hello, </i>"#),
        &[],
    ));

    assert_eq!(node.children().len(), 2);
    assert_eq!(node.children()[0].as_element().unwrap().get_attr("src"), Some("foo.jpg"));
    assert_eq!(node.outer_html(), r#"<img src="foo.jpg"><i>Hello, </i>"#);
}

#[test]
fn test_substituted_text_is_not_markup() {
    let node = render_dom(jsx_to_dom(&fragments!("<p>", "</p>"), &[Value::from("<b>x</b>")]));
    assert_eq!(node.children(), &[Node::text("<b>x</b>")]);
    assert_eq!(node.outer_html(), "<p>&lt;b&gt;x&lt;/b&gt;</p>");
}

#[test]
fn test_node_substitution_is_inserted() {
    let mut em = ElementData::new("em");
    em.append_child(Node::text("inner"));

    let node = render_dom(jsx_to_dom(&fragments!("<p>", "</p>"), &[Value::from(Node::from(em))]));
    assert_eq!(node.outer_html(), "<p><em>inner</em></p>");
}

#[test]
fn test_component_returns_nodes() {
    let map = ClassMap::<Node>::new().with("Card", |props| {
        let mut card = ElementData::new("article");
        card.set_attr("title", props.get("title").unwrap_or_default());
        card.append_child(props.into_children());
        Ok(Rendered::Ready(Node::from(card)))
    });
    let jsx = jsx_to_dom_with(map);

    let node = render_dom(jsx.render(
        &fragments!(r#"<section><Card title=""#, r#""><p>Body</p></Card></section>"#),
        &[Value::from("News")],
    ));
    assert_eq!(
        node.outer_html(),
        r#"<section><article title="News"><p>Body</p></article></section>"#
    );
}

#[test]
fn test_async_component_in_dom_mode() {
    let map = ClassMap::<Node>::new().with("Later", |props| {
        let children = props.into_children();
        Ok(Rendered::pending(async move {
            smol::future::yield_now().await;
            let mut wrapper = ElementData::new("span");
            wrapper.append_child(children);
            Ok(Node::from(wrapper))
        }))
    });
    let jsx = jsx_to_dom_with(map);

    let rendered = jsx
        .render(&fragments!("<ul><li><Later>", "</Later></li><li>now</li></ul>"), &[Value::from(1)])
        .unwrap();
    assert!(rendered.is_pending());

    let node = smol::block_on(rendered.resolve()).unwrap();
    assert_eq!(node.outer_html(), "<ul><li><span>1</span></li><li>now</li></ul>");
}

#[test]
fn test_pretty_output() {
    let node = render_dom(jsx_to_dom(&fragments!("<ul><li>", "</li></ul>"), &[Value::from("a")]));
    assert_eq!(HtmlSerializer::pretty().serialize_outer(&node), "<ul>\n  <li>a</li>\n</ul>");
}

#[test]
fn test_entities_and_comments_match_string_output() {
    let node = render_dom(jsx_to_dom(&fragments!("<p>", " &amp; x</p>"), &[Value::from("a")]));
    assert_eq!(node.text_content(), "a & x");
    assert_eq!(node.outer_html(), "<p>a &amp; x</p>");

    let node = render_dom(jsx_to_dom(&fragments!("<p>&lt;b&gt; &amp; c</p>"), &[]));
    assert_eq!(node.text_content(), "<b> & c");
    assert_eq!(node.outer_html(), "<p>&lt;b&gt; &amp; c</p>");

    let node = render_dom(jsx_to_dom(&fragments!("<div><!-- a & b --><i>", "</i></div>"), &[Value::from(1)]));
    assert_eq!(node.children()[0], Node::comment(" a & b "));
    assert_eq!(node.outer_html(), "<div><!-- a & b --><i>1</i></div>");
}
