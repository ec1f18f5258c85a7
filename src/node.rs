use crate::error::{MarkdownError, Result};
use indexmap::IndexMap;

/// HTML attributes, serialized in insertion order.
pub type Attributes = IndexMap<String, String>;

/// An HTML tree node.
///
/// A `Leaf` carries a value and no children; a `Parent` carries children and
/// no value. Nothing is escaped on render: values and attribute values are
/// written out exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Attributes,
    },
    Parent {
        tag: Option<String>,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged leaf, rendered as its bare value.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: Some(tag.into()),
            children,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => {
                attributes.insert(key.into(), value.into());
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } | Node::Parent { tag, .. } => tag.as_deref(),
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf {
                tag,
                value,
                attributes,
            } => {
                let value = value
                    .as_deref()
                    .ok_or_else(|| MarkdownError::MissingNodeValue { tag: tag.clone() })?;
                match tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(out, tag, attributes);
                        out.push_str(value);
                        close_tag(out, tag);
                    }
                }
            }
            Node::Parent {
                tag,
                children,
                attributes,
            } => {
                let Some(tag) = tag else {
                    return Err(MarkdownError::InvalidNodeStructure {
                        tag: None,
                        reason: "parent nodes must have a tag",
                    });
                };
                if children.is_empty() {
                    return Err(MarkdownError::InvalidNodeStructure {
                        tag: Some(tag.clone()),
                        reason: "parent nodes must have children",
                    });
                }
                open_tag(out, tag, attributes);
                for child in children {
                    child.render_into(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

pub fn attributes_to_html(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(k, v)| format!(" {}=\"{}\"", k, v))
        .collect()
}

fn open_tag(out: &mut String, tag: &str, attributes: &Attributes) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attributes_to_html(attributes));
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_to_html() {
        let node = Node::leaf("a", "Click")
            .with_attribute("href", "https://www.google.com")
            .with_attribute("target", "_blank");
        match &node {
            Node::Leaf { attributes, .. } => assert_eq!(
                attributes_to_html(attributes),
                " href=\"https://www.google.com\" target=\"_blank\""
            ),
            _ => panic!("expected leaf"),
        }
        assert_eq!(attributes_to_html(&Attributes::new()), "");
    }

    #[test]
    fn test_leaf_render() {
        assert_eq!(Node::leaf("p", "Hello, world!").render().unwrap(), "<p>Hello, world!</p>");
        assert_eq!(Node::text("Just text").render().unwrap(), "Just text");
        assert_eq!(Node::leaf("p", "").render().unwrap(), "<p></p>");
    }

    #[test]
    fn test_leaf_with_attributes() {
        let node = Node::leaf("a", "Click me!").with_attribute("href", "https://www.google.com");
        assert_eq!(
            node.render().unwrap(),
            "<a href=\"https://www.google.com\">Click me!</a>"
        );
    }

    #[test]
    fn test_leaf_missing_value() {
        let node = Node::Leaf {
            tag: Some("p".to_string()),
            value: None,
            attributes: Attributes::new(),
        };
        assert_eq!(
            node.render(),
            Err(MarkdownError::MissingNodeValue {
                tag: Some("p".to_string())
            })
        );
    }

    #[test]
    fn test_no_escaping() {
        let node = Node::leaf("span", "<b>\"raw\"</b>").with_attribute("title", "a\"b<c>");
        assert_eq!(
            node.render().unwrap(),
            "<span title=\"a\"b<c>\"><b>\"raw\"</b></span>"
        );
    }

    #[test]
    fn test_parent_render() {
        let node = Node::parent(
            "p",
            vec![
                Node::leaf("b", "Bold text"),
                Node::text("Normal text"),
                Node::leaf("i", "italic text"),
                Node::text("Normal text"),
            ],
        );
        assert_eq!(
            node.render().unwrap(),
            "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
        );
    }

    #[test]
    fn test_nested_parents() {
        let grandchild = Node::leaf("b", "grandchild");
        let child = Node::parent("span", vec![grandchild]);
        let node = Node::parent("div", vec![child]).with_attribute("class", "wrap");
        assert_eq!(
            node.render().unwrap(),
            "<div class=\"wrap\"><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn test_parent_without_children() {
        let err = Node::parent("div", vec![]).render().unwrap_err();
        assert!(matches!(
            err,
            MarkdownError::InvalidNodeStructure { tag: Some(ref t), .. } if t == "div"
        ));
    }

    #[test]
    fn test_parent_without_tag() {
        let node = Node::Parent {
            tag: None,
            children: vec![Node::text("x")],
            attributes: Attributes::new(),
        };
        assert!(matches!(
            node.render(),
            Err(MarkdownError::InvalidNodeStructure { tag: None, .. })
        ));
    }

    #[test]
    fn test_invalid_child_fails_whole_render() {
        let bad = Node::Leaf {
            tag: None,
            value: None,
            attributes: Attributes::new(),
        };
        let node = Node::parent("p", vec![Node::text("ok"), bad]);
        assert!(matches!(
            node.render(),
            Err(MarkdownError::MissingNodeValue { tag: None })
        ));
    }

    #[test]
    fn test_render_is_idempotent() {
        let node = Node::parent("ul", vec![Node::parent("li", vec![Node::text("one")])]);
        assert_eq!(node.render(), node.render());
    }
}
