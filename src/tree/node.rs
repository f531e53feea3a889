//! Documentation tree nodes.
//!
//! Nodes are serialized with a `kind` tag. Keys the filter does not use
//! (title, icon, href, ...) are kept in `attrs` and written back unchanged.
//! A node with a missing or unrecognized `kind`, or a page without a string
//! `path`, is kept verbatim as [`PageNode::Unknown`].
//!
//! ```json
//! [
//!   { "kind": "folder", "path": "clients", "index": "clients/index", "children": [
//!       { "kind": "page", "path": "clients/acme", "title": "Acme" }
//!   ]},
//!   { "kind": "separator" }
//! ]
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A leaf page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

/// A folder with an optional index page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub path: String,
    /// Path of the folder's index page.
    #[serde(default, alias = "indexPath", skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default)]
    pub children: Vec<PageNode>,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Separator {
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageNode {
    Page(Page),
    Folder(Folder),
    Separator(Separator),
    /// Passed through untouched.
    Unknown(Value),
}

impl PageNode {
    pub fn page(path: impl Into<String>) -> Self {
        Self::Page(Page {
            path: path.into(),
            attrs: Map::new(),
        })
    }

    pub fn folder(path: impl Into<String>, index: Option<&str>, children: Vec<Self>) -> Self {
        Self::Folder(Folder {
            path: path.into(),
            index: index.map(str::to_owned),
            children,
            attrs: Map::new(),
        })
    }

    pub fn separator() -> Self {
        Self::Separator(Separator::default())
    }

    /// Attach a display attribute such as `title`.
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        match &mut self {
            Self::Page(Page { attrs, .. })
            | Self::Folder(Folder { attrs, .. })
            | Self::Separator(Separator { attrs }) => {
                attrs.insert(key.to_owned(), value.into());
            }
            Self::Unknown(_) => {}
        }
        self
    }

    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator(_))
    }

    /// Path of a page or folder.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Page(page) => Some(&page.path),
            Self::Folder(folder) => Some(&folder.path),
            Self::Separator(_) | Self::Unknown(_) => None,
        }
    }

    pub fn children(&self) -> &[Self] {
        match self {
            Self::Folder(folder) => &folder.children,
            _ => &[],
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Page(_) => "page",
            Self::Folder(_) => "folder",
            Self::Separator(_) => "separator",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Total number of nodes in a forest, descendants included.
pub fn count_nodes(nodes: &[PageNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_nodes(node.children()))
        .sum()
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    kind: &'static str,
    #[serde(flatten)]
    node: &'a T,
}

impl Serialize for PageNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Self::Page(node) => Tagged { kind, node }.serialize(serializer),
            Self::Folder(node) => Tagged { kind, node }.serialize(serializer),
            Self::Separator(node) => Tagged { kind, node }.serialize(serializer),
            Self::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PageNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let mut map = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            other => return Ok(Self::Unknown(other)),
        };

        let kind = match map.get("kind").and_then(Value::as_str) {
            Some(kind @ ("page" | "folder" | "separator")) => kind.to_owned(),
            _ => return Ok(Self::Unknown(Value::Object(map))),
        };
        if kind == "page" && !map.get("path").is_some_and(Value::is_string) {
            return Ok(Self::Unknown(Value::Object(map)));
        }
        map.remove("kind");

        let value = Value::Object(map);
        let node = match kind.as_str() {
            "page" => Page::deserialize(value).map(Self::Page),
            "folder" => Folder::deserialize(value).map(Self::Folder),
            _ => Separator::deserialize(value).map(Self::Separator),
        };
        node.map_err(|e| D::Error::custom(format!("invalid {kind} node: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_forest() {
        let nodes: Vec<PageNode> = serde_json::from_value(json!([
            { "kind": "folder", "path": "clients", "indexPath": "clients/index", "children": [
                { "kind": "page", "path": "clients/acme", "title": "Acme" }
            ]},
            { "kind": "separator" }
        ]))
        .unwrap();

        let PageNode::Folder(folder) = &nodes[0] else {
            panic!("expected folder, got {:?}", nodes[0]);
        };
        assert_eq!(folder.index.as_deref(), Some("clients/index"));
        assert_eq!(folder.children[0].path(), Some("clients/acme"));
        assert!(nodes[1].is_separator());
    }

    #[test]
    fn test_attrs_preserved() {
        let input = json!({ "kind": "page", "path": "a", "title": "A", "icon": "book" });
        let node: PageNode = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn test_unknown_kind_kept_verbatim() {
        let input = json!({ "kind": "link", "href": "https://example.com" });
        let node: PageNode = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(node, PageNode::Unknown(input.clone()));
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn test_missing_kind_is_unknown() {
        let node: PageNode = serde_json::from_value(json!({ "path": "a" })).unwrap();
        assert_eq!(node.kind(), "unknown");
    }

    #[test]
    fn test_page_without_path_kept_verbatim() {
        for input in [
            json!({ "kind": "page", "title": "Draft" }),
            json!({ "kind": "page", "path": 7 }),
        ] {
            let node: PageNode = serde_json::from_value(input.clone()).unwrap();
            assert_eq!(node, PageNode::Unknown(input.clone()));
            assert_eq!(serde_json::to_value(&node).unwrap(), input);
        }
    }

    #[test]
    fn test_malformed_folder_is_error() {
        let result: Result<PageNode, _> =
            serde_json::from_value(json!({ "kind": "folder", "children": "nope" }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid folder node"));
    }

    #[test]
    fn test_serialize_folder() {
        let node = PageNode::folder("a", Some("a/index"), vec![PageNode::separator()])
            .with_attr("title", "A");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "kind": "folder",
                "path": "a",
                "index": "a/index",
                "children": [{ "kind": "separator" }],
                "title": "A"
            })
        );
    }

    #[test]
    fn test_count_nodes() {
        let forest = vec![
            PageNode::folder("a", None, vec![PageNode::page("a/b"), PageNode::page("a/c")]),
            PageNode::separator(),
        ];
        assert_eq!(count_nodes(&forest), 4);
    }
}
