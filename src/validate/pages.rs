//! Page tree walker.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.7.3 - Page Tree.
//!
//! The tree is walked depth-first from the catalog's `/Pages`. Each node is
//! latched on first visit, so a node reachable twice is reported instead of
//! walked again. Inheritable attributes flow down as an [`InheritedAttributes`]
//! value; a node's own entries replace the inherited ones for its subtree.

use crate::error::{Error, PageTreeFault, Result};
use crate::geometry::Rectangle;
use crate::object::{Dictionary, Object, ObjectRef};
use crate::validate::catalog::validate_output_intents;
use crate::validate::colorspace::validate_color_space;
use crate::validate::date::validate_date_entry;
use crate::validate::entry::{
    name_in, validate_array_entry, validate_boolean_entry, validate_dict_array_entry,
    validate_dict_entry, validate_either, validate_ind_ref_array_entry, validate_ind_ref_entry,
    validate_integer_entry, validate_name_entry, validate_number_array_entry,
    validate_number_entry, validate_one_or_many, validate_rectangle_entry, validate_stream_entry,
    validate_string_entry, NameKind, StreamKind, StringKind,
};
use crate::validate::resources::validate_resources;
use crate::validate::xobject::{validate_group_attributes, validate_metadata_entry};
use crate::version::{Version, VersionGate};
use crate::xref::XRefTable;
use serde::Serialize;

const PAGES: &str = "pagesDict";
const PAGE: &str = "pageDict";
/// Latch kind of page tree nodes.
const PAGE_NODE: &str = "PageNode";

/// Attributes a page inherits from its ancestors.
///
/// PDF Spec: ISO 32000-1:2008, Section 7.7.3.4 - Inheritance of Page Attributes
#[derive(Debug, Clone, Default)]
pub struct InheritedAttributes {
    /// `/Resources`, as written in the nearest ancestor that has one
    pub resources: Option<Object>,
    /// `/MediaBox`
    pub media_box: Option<Rectangle>,
    /// `/CropBox`
    pub crop_box: Option<Rectangle>,
    /// `/Rotate`
    pub rotate: Option<i64>,
}

impl InheritedAttributes {
    /// Validate the inheritable entries of `dict` and layer them over `self`.
    fn merge(&self, xref: &mut XRefTable, node: ObjectRef, dict: &Dictionary, dict_name: &str) -> Result<Self> {
        let mut merged = self.clone();

        if let Some(resources) = dict.get("Resources") {
            if validate_resources(xref, resources)? {
                merged.resources = Some(resources.clone());
            }
            xref.set_current_object(node);
        }
        if let Some(media_box) = validate_rectangle_entry(xref, dict, dict_name, "MediaBox", false, Version::V10, None)? {
            merged.media_box = Some(media_box);
        }
        if let Some(crop_box) = validate_rectangle_entry(xref, dict, dict_name, "CropBox", false, Version::V10, None)? {
            merged.crop_box = Some(crop_box);
        }
        if let Some(rotate) =
            validate_integer_entry(xref, dict, dict_name, "Rotate", false, Version::V10, Some(&|r: &i64| r % 90 == 0))?
        {
            merged.rotate = Some(rotate);
        }
        Ok(merged)
    }
}

/// What a successful walk learned about one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    /// 1-based page number
    pub index: usize,
    /// The page object
    pub object: ObjectRef,
    /// Effective media box
    pub media_box: Option<Rectangle>,
    /// Effective crop box
    pub crop_box: Option<Rectangle>,
    /// Effective rotation in degrees
    pub rotate: i64,
    /// Whether the page's resources come from an ancestor
    pub resources_inherited: bool,
}

/// Walk the page tree rooted at the catalog's `/Pages`.
///
/// The number of pages found must equal the root's `/Count`.
pub fn validate_pages(xref: &mut XRefTable, root_dict: &Dictionary) -> Result<Vec<PageSummary>> {
    let root_ref = match root_dict.get("Pages") {
        Some(Object::Reference(r)) => *r,
        _ => return Err(Error::page_tree(None, PageTreeFault::CorruptPagesReference)),
    };
    xref.set_current_object(root_ref);

    let root = match xref.dereference(&Object::Reference(root_ref))? {
        Object::Dictionary(d) => d,
        Object::Null => return Err(Error::ObjectNotFound(root_ref)),
        _ => return Err(Error::page_tree(Some(root_ref), PageTreeFault::CorruptNode)),
    };
    match node_type(xref, root_ref, &root)?.as_str() {
        "Pages" => {},
        other => {
            return Err(Error::page_tree(
                Some(root_ref),
                PageTreeFault::UnexpectedNodeType(other.to_string()),
            ))
        },
    }

    let count = node_count(xref, root_ref, &root)?;
    xref.set_page_count(count as usize);
    xref.mark_validated(root_ref, PAGE_NODE);
    log::debug!("Page tree root {} declares {} pages", root_ref, count);

    let mut pages = Vec::new();
    validate_pages_dict(xref, root_ref, &root, &InheritedAttributes::default(), 1, &mut pages)?;

    if pages.len() as i64 != count {
        return Err(Error::page_tree(
            Some(root_ref),
            PageTreeFault::CountMismatch {
                declared: count,
                actual: pages.len(),
            },
        ));
    }
    Ok(pages)
}

/// Validate a `Pages` node and everything below it.
pub fn validate_pages_dict(
    xref: &mut XRefTable,
    node_ref: ObjectRef,
    dict: &Dictionary,
    inherited: &InheritedAttributes,
    depth: u32,
    pages: &mut Vec<PageSummary>,
) -> Result<()> {
    let max_depth = xref.config().max_recursion_depth;
    if depth > max_depth {
        log::error!("Page tree deeper than {} at {}", max_depth, node_ref);
        return Err(Error::RecursionLimitExceeded(max_depth));
    }

    if node_count(xref, node_ref, dict)? == 0 {
        log::debug!("Skipping empty Pages node {}", node_ref);
        return Ok(());
    }

    let inherited = inherited.merge(xref, node_ref, dict, PAGES)?;

    let kids = match dict.get("Kids").map(|k| xref.dereference(k)).transpose()? {
        Some(Object::Array(kids)) => kids,
        _ => return Err(Error::page_tree(Some(node_ref), PageTreeFault::CorruptKids)),
    };

    for kid in &kids {
        let Object::Reference(kid_ref) = kid else {
            return Err(Error::page_tree(Some(node_ref), PageTreeFault::CorruptKids));
        };
        let kid_ref = *kid_ref;

        if !xref.mark_validated(kid_ref, PAGE_NODE) {
            return Err(Error::page_tree(Some(kid_ref), PageTreeFault::DuplicateNode));
        }
        xref.set_current_object(kid_ref);

        let kid_dict = match xref.dereference(kid)? {
            Object::Dictionary(d) => d,
            Object::Null => return Err(Error::ObjectNotFound(kid_ref)),
            _ => return Err(Error::page_tree(Some(kid_ref), PageTreeFault::CorruptNode)),
        };

        let kind = node_type(xref, kid_ref, &kid_dict)?;
        check_parent(kid_ref, &kid_dict, node_ref)?;

        match kind.as_str() {
            "Pages" => validate_pages_dict(xref, kid_ref, &kid_dict, &inherited, depth + 1, pages)?,
            "Page" => {
                let summary = validate_page_dict(xref, kid_ref, &kid_dict, &inherited)?;
                pages.push(summary);
            },
            other => {
                return Err(Error::page_tree(
                    Some(kid_ref),
                    PageTreeFault::UnexpectedNodeType(other.to_string()),
                ))
            },
        }
    }
    Ok(())
}

fn node_type(xref: &XRefTable, node_ref: ObjectRef, dict: &Dictionary) -> Result<String> {
    match dict.get("Type").map(|t| xref.dereference(t)).transpose()? {
        Some(Object::Name(name)) => Ok(name),
        Some(Object::Null) | None => Err(Error::page_tree(Some(node_ref), PageTreeFault::MissingNodeType)),
        Some(other) => Err(Error::page_tree(
            Some(node_ref),
            PageTreeFault::UnexpectedNodeType(other.type_name().to_string()),
        )),
    }
}

fn node_count(xref: &XRefTable, node_ref: ObjectRef, dict: &Dictionary) -> Result<i64> {
    match dict.get("Count").map(|c| xref.dereference(c)).transpose()? {
        Some(Object::Integer(n)) if n >= 0 => Ok(n),
        _ => Err(Error::page_tree(Some(node_ref), PageTreeFault::MissingCount)),
    }
}

fn check_parent(kid_ref: ObjectRef, kid: &Dictionary, parent: ObjectRef) -> Result<()> {
    match kid.get("Parent") {
        Some(Object::Reference(p)) if p.id == parent.id => Ok(()),
        Some(Object::Reference(p)) => Err(Error::page_tree(
            Some(kid_ref),
            PageTreeFault::ParentMismatch {
                expected: parent.id,
                found: p.id,
            },
        )),
        _ => Err(Error::page_tree(Some(kid_ref), PageTreeFault::MissingParent)),
    }
}

/// Validate a `Page` leaf.
pub fn validate_page_dict(
    xref: &mut XRefTable,
    page_ref: ObjectRef,
    dict: &Dictionary,
    inherited: &InheritedAttributes,
) -> Result<PageSummary> {
    let index = xref.advance_page();
    log::debug!("Validating page {} ({})", index, page_ref);

    let relaxed = xref.config().is_relaxed();

    validate_date_entry(xref, dict, PAGE, "LastModified", false, Version::V13)?;

    let own_resources = match dict.get("Resources") {
        Some(resources) => {
            let present = validate_resources(xref, resources)?;
            xref.set_current_object(page_ref);
            present
        },
        None => false,
    };
    if !own_resources && inherited.resources.is_none() {
        if relaxed {
            log::warn!("Page {} has no resources", index);
        } else {
            return Err(Error::missing(PAGE, "Resources"));
        }
    }

    let media_box = match validate_rectangle_entry(
        xref,
        dict,
        PAGE,
        "MediaBox",
        inherited.media_box.is_none() && !relaxed,
        Version::V10,
        None,
    )? {
        Some(media_box) => Some(media_box),
        None => {
            if inherited.media_box.is_none() {
                log::warn!("Page {} has no media box", index);
            }
            inherited.media_box
        },
    };
    let crop_box = validate_rectangle_entry(xref, dict, PAGE, "CropBox", false, Version::V10, None)?
        .or(inherited.crop_box);
    for entry in ["BleedBox", "TrimBox", "ArtBox"] {
        validate_rectangle_entry(xref, dict, PAGE, entry, false, Version::V13, None)?;
    }
    if let Some(info) = validate_dict_entry(xref, dict, PAGE, "BoxColorInfo", false, Version::V14)? {
        validate_box_color_info(xref, &info)?;
    }

    validate_one_or_many::<StreamKind>(xref, dict, PAGE, "Contents", false, Version::V10, None)?;

    let rotate = validate_integer_entry(xref, dict, PAGE, "Rotate", false, Version::V10, Some(&|r: &i64| r % 90 == 0))?
        .or(inherited.rotate)
        .unwrap_or(0);

    if let Some(group) = validate_dict_entry(xref, dict, PAGE, "Group", false, Version::V14)? {
        validate_group_attributes(xref, &group)?;
        xref.set_current_object(page_ref);
    }

    if validate_stream_entry(xref, dict, PAGE, "Thumb", false, Version::V10)?.is_some() {
        if let Some(Object::Reference(thumb)) = dict.get("Thumb") {
            xref.record_thumb(index, *thumb);
        }
    }

    validate_ind_ref_array_entry(xref, dict, PAGE, "B", false, Version::V11, None)?;
    validate_number_entry(xref, dict, PAGE, "Dur", false, Version::V11, None)?;
    if let Some(trans) = validate_dict_entry(xref, dict, PAGE, "Trans", false, Version::V11)? {
        validate_transition(xref, &trans)?;
    }
    validate_annotations(xref, dict)?;
    if let Some(actions) = validate_dict_entry(xref, dict, PAGE, "AA", false, Version::V12)? {
        validate_dict_entry(xref, &actions, "pageAdditionalActionsDict", "O", false, Version::V12)?;
        validate_dict_entry(xref, &actions, "pageAdditionalActionsDict", "C", false, Version::V12)?;
    }
    validate_metadata_entry(xref, dict, PAGE)?;
    validate_dict_entry(xref, dict, PAGE, "PieceInfo", false, Version::V13)?;
    validate_integer_entry(xref, dict, PAGE, "StructParents", false, Version::V13, None)?;
    validate_string_entry(xref, dict, PAGE, "ID", false, Version::V13, None)?;
    validate_number_entry(xref, dict, PAGE, "PZ", false, Version::V13, None)?;
    if let Some(info) = validate_dict_entry(xref, dict, PAGE, "SeparationInfo", false, Version::V13)? {
        validate_separation_info(xref, &info)?;
        xref.set_current_object(page_ref);
    }
    validate_tabs(xref, dict)?;
    validate_name_entry(xref, dict, PAGE, "TemplateInstantiated", false, Version::V15, None)?;
    validate_dict_entry(xref, dict, PAGE, "PresSteps", false, Version::V15)?;
    validate_number_entry(xref, dict, PAGE, "UserUnit", false, Version::V16, Some(&|u: f64| u > 0.0))?;
    validate_viewports(xref, dict)?;
    validate_array_entry(xref, dict, PAGE, "AF", false, Version::V20, None)?;
    validate_output_intents(xref, dict, PAGE, Version::V20)?;
    validate_ind_ref_entry(xref, dict, PAGE, "DPart", false, Version::V20)?;

    Ok(PageSummary {
        index,
        object: page_ref,
        media_box,
        crop_box,
        rotate,
        resources_inherited: !own_resources && inherited.resources.is_some(),
    })
}

/// `Tabs`: tab order name. Relaxed mode also takes a string and an older document.
fn validate_tabs(xref: &XRefTable, dict: &Dictionary) -> Result<()> {
    let gate = VersionGate::since(Version::V15).relaxed_to(Version::V13);

    let tabs = dict.get("Tabs").map(|t| xref.dereference(t)).transpose()?;
    if let Some(Object::String(s) | Object::HexString(s)) = &tabs {
        if xref.config().is_relaxed() {
            xref.validate_version("pageDict.Tabs", gate)?;
            log::warn!("pageDict: /Tabs written as string ({})", String::from_utf8_lossy(s));
            return Ok(());
        }
    }

    let orders = ["R", "C", "S", "A", "W"];
    if let Some(order) = validate_name_entry(xref, dict, PAGE, "Tabs", false, gate, Some(&name_in(&orders)))? {
        if order == "A" || order == "W" {
            xref.validate_version(&format!("pageDict.Tabs.{}", order), Version::V20)?;
        }
    }
    Ok(())
}

fn validate_box_color_info(xref: &XRefTable, info: &Dictionary) -> Result<()> {
    const DICT: &str = "boxStyleDict";
    for entry in ["CropBox", "BleedBox", "TrimBox", "ArtBox"] {
        let Some(style) = validate_dict_entry(xref, info, "boxColorInfoDict", entry, false, Version::V14)? else {
            continue;
        };
        let rgb = |a: &Vec<Object>| {
            a.len() == 3 && a.iter().all(|c| c.as_number().is_some_and(|v| (0.0..=1.0).contains(&v)))
        };
        validate_number_array_entry(xref, &style, DICT, "C", false, Version::V14, Some(&rgb))?;
        validate_number_entry(xref, &style, DICT, "W", false, Version::V14, Some(&|w: f64| w >= 0.0))?;
        validate_name_entry(xref, &style, DICT, "S", false, Version::V14, Some(&name_in(&["S", "D"])))?;
        validate_array_entry(xref, &style, DICT, "D", false, Version::V14, None)?;
    }
    Ok(())
}

fn validate_transition(xref: &XRefTable, trans: &Dictionary) -> Result<()> {
    const DICT: &str = "transitionDict";
    let styles = [
        "Split", "Blinds", "Box", "Wipe", "Dissolve", "Glitter", "R", "Fly", "Push", "Cover", "Uncover", "Fade",
    ];
    validate_name_entry(xref, trans, DICT, "Type", false, Version::V10, Some(&name_in(&["Trans"])))?;
    let style = validate_name_entry(xref, trans, DICT, "S", false, Version::V11, Some(&name_in(&styles)))?;
    if let Some(style) = style {
        if matches!(style.as_str(), "Fly" | "Push" | "Cover" | "Uncover" | "Fade") {
            xref.validate_version(&format!("transitionDict.S.{}", style), Version::V15)?;
        }
    }
    validate_number_entry(xref, trans, DICT, "D", false, Version::V11, Some(&|d: f64| d >= 0.0))?;
    validate_name_entry(xref, trans, DICT, "Dm", false, Version::V11, Some(&name_in(&["H", "V"])))?;
    validate_name_entry(xref, trans, DICT, "M", false, Version::V11, Some(&name_in(&["I", "O"])))?;
    validate_number_entry(xref, trans, DICT, "SS", false, Version::V15, None)?;
    validate_boolean_entry(xref, trans, DICT, "B", false, Version::V15)?;
    Ok(())
}

fn validate_annotations(xref: &XRefTable, dict: &Dictionary) -> Result<()> {
    const DICT: &str = "annotDict";
    let Some(annots) = validate_dict_array_entry(xref, dict, PAGE, "Annots", false, Version::V10, None)? else {
        return Ok(());
    };
    for annot in &annots {
        validate_name_entry(xref, annot, DICT, "Type", false, Version::V10, Some(&name_in(&["Annot"])))?;
        validate_name_entry(xref, annot, DICT, "Subtype", true, Version::V10, None)?;
        validate_rectangle_entry(xref, annot, DICT, "Rect", true, Version::V10, None)?;
        validate_string_entry(xref, annot, DICT, "Contents", false, Version::V10, None)?;
        validate_ind_ref_entry(xref, annot, DICT, "P", false, Version::V13)?;
        validate_integer_entry(xref, annot, DICT, "F", false, Version::V11, None)?;
    }
    Ok(())
}

fn validate_separation_info(xref: &mut XRefTable, info: &Dictionary) -> Result<()> {
    const DICT: &str = "separationDict";
    validate_ind_ref_array_entry(xref, info, DICT, "Pages", true, Version::V13, None)?;
    validate_either::<NameKind, StringKind>(xref, info, DICT, "DeviceColorant", true, Version::V13)?;
    if let Some(cs) = info.get("ColorSpace") {
        validate_color_space(xref, cs, true)?;
    }
    Ok(())
}

fn validate_viewports(xref: &XRefTable, dict: &Dictionary) -> Result<()> {
    const DICT: &str = "viewportDict";
    let Some(viewports) = validate_dict_array_entry(xref, dict, PAGE, "VP", false, Version::V16, None)? else {
        return Ok(());
    };
    for vp in &viewports {
        validate_name_entry(xref, vp, DICT, "Type", false, Version::V16, Some(&name_in(&["Viewport"])))?;
        validate_rectangle_entry(xref, vp, DICT, "BBox", true, Version::V16, None)?;
        validate_string_entry(xref, vp, DICT, "Name", false, Version::V16, None)?;
        validate_dict_entry(xref, vp, DICT, "Measure", false, Version::V16)?;
    }
    Ok(())
}
