//! Netscape bookmark file parser.
//!
//! Browsers export bookmarks as loosely structured HTML: `<DT>` and `<p>` are
//! never closed and folders are a `<DT><H3>` followed by a nested `<DL>`. The
//! document is fed through an HTML5 tree builder, which restores the implied
//! end tags, and the resulting element tree is walked into [`SourceNode`]s.

use crate::error::{Result, StashError};
use crate::utils;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use std::path::Path;

const DOCTYPE_MARKER: &str = "netscape-bookmark-file-1";

/// One entry of a parsed bookmark tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    Folder(SourceFolder),
    Link(SourceLink),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFolder {
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub children: Vec<SourceNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLink {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Read and parse a Netscape bookmark file
///
/// See [`parse_netscape_html`] for the meaning of `max_depth`.
pub fn parse_netscape_file(path: &Path, max_depth: usize) -> Result<Vec<SourceNode>> {
    let html = std::fs::read_to_string(path)?;
    parse_netscape_html(&html, max_depth)
}

/// Parse the contents of a Netscape bookmark file into root nodes.
///
/// Roots are level 0. Lists are read down to level `max_depth + 1`; folders
/// on that last level come back without children, so the tree never nests
/// deeper than the caller is willing to walk.
pub fn parse_netscape_html(html: &str, max_depth: usize) -> Result<Vec<SourceNode>> {
    let has_doctype = html
        .lines()
        .take(8)
        .any(|line| line.to_ascii_lowercase().contains(DOCTYPE_MARKER));
    if !has_doctype {
        return Err(StashError::HtmlParse(
            "not a Netscape bookmark file (missing NETSCAPE-Bookmark-file-1 doctype)".to_string(),
        ));
    }

    let document = Html::parse_document(html);
    let root_list = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "dl");

    let nodes = match root_list {
        Some(dl) => parse_list(dl, max_depth),
        None => Vec::new(),
    };
    log::debug!("Parsed {} root bookmark node(s)", nodes.len());
    Ok(nodes)
}

/// A `<DL>` being read, together with the folder its entries belong to
struct ListFrame<'a> {
    entries: Vec<ElementRef<'a>>,
    next: usize,
    /// Level of the entries in this list
    depth: usize,
    /// `None` for the root list and for bare nested lists
    folder: Option<SourceFolder>,
    nodes: Vec<SourceNode>,
}

impl<'a> ListFrame<'a> {
    fn new(dl: ElementRef<'a>, depth: usize, folder: Option<SourceFolder>) -> Self {
        Self {
            entries: dl.children().filter_map(ElementRef::wrap).collect(),
            next: 0,
            depth,
            folder,
            nodes: Vec::new(),
        }
    }

    fn next_entry(&mut self) -> Option<ElementRef<'a>> {
        let entry = self.entries.get(self.next).copied()?;
        self.next += 1;
        Some(entry)
    }

    fn next_description(&mut self) -> Option<ElementRef<'a>> {
        let entry = self.entries.get(self.next).copied()?;
        if entry.value().name() != "dd" {
            return None;
        }
        self.next += 1;
        Some(entry)
    }

    fn finish(self) -> Vec<SourceNode> {
        match self.folder {
            Some(mut folder) => {
                folder.children = self.nodes;
                vec![SourceNode::Folder(folder)]
            }
            None => self.nodes,
        }
    }
}

enum Entry<'a> {
    Folder(SourceFolder, Option<ElementRef<'a>>),
    Link(SourceLink),
}

fn parse_list(root: ElementRef<'_>, max_depth: usize) -> Vec<SourceNode> {
    let mut stack = vec![ListFrame::new(root, 0, None)];

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.next_entry() else {
            let Some(finished) = stack.pop() else { break };
            let nodes = finished.finish();
            match stack.last_mut() {
                Some(parent) => parent.nodes.extend(nodes),
                None => return nodes,
            }
            continue;
        };

        match child.value().name() {
            "dt" => {
                let dd = frame.next_description();
                match parse_entry(child, dd) {
                    Some(Entry::Folder(folder, Some(sublist))) if frame.depth <= max_depth => {
                        let depth = frame.depth + 1;
                        stack.push(ListFrame::new(sublist, depth, Some(folder)));
                    }
                    Some(Entry::Folder(folder, _)) => frame.nodes.push(SourceNode::Folder(folder)),
                    Some(Entry::Link(link)) => frame.nodes.push(SourceNode::Link(link)),
                    None => {}
                }
            }
            // A list nested without its <DT><H3> header; keep its entries at this level
            "dl" => {
                let depth = frame.depth;
                stack.push(ListFrame::new(child, depth, None));
            }
            _ => {}
        }
    }

    Vec::new()
}

fn parse_entry<'a>(dt: ElementRef<'a>, dd: Option<ElementRef<'a>>) -> Option<Entry<'a>> {
    let mut elements = dt.children().filter_map(ElementRef::wrap);
    let head = elements.find(|el| matches!(el.value().name(), "h3" | "a"))?;

    if head.value().name() == "h3" {
        let sublist = find_child(dt, "dl").or_else(|| dd.and_then(|dd| find_child(dd, "dl")));
        let folder = SourceFolder {
            title: element_text(head),
            created_at: date_attr(head, "add_date"),
            last_modified: date_attr(head, "last_modified"),
            children: Vec::new(),
        };
        Some(Entry::Folder(folder, sublist))
    } else {
        Some(Entry::Link(SourceLink {
            title: non_empty(element_text(head)),
            url: head
                .value()
                .attr("href")
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_string),
            description: dd.and_then(|dd| non_empty(own_text(dd))),
            icon: head
                .value()
                .attr("icon")
                .filter(|icon| !icon.is_empty())
                .map(str::to_string),
            created_at: date_attr(head, "add_date"),
        }))
    }
}

fn find_child<'a>(parent: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text directly inside `el`, ignoring nested elements such as a folder's `<DL>`
fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect::<String>()
        .trim()
        .to_string()
}

fn date_attr(el: ElementRef<'_>, name: &str) -> Option<DateTime<Utc>> {
    el.value().attr(name).and_then(utils::parse_unix_timestamp)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
