//! Attribute Registry
//!
//! Which system props each component kind accepts. The table is composed once
//! from the named prop groups and is shared read-only by every worker.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

// ═══════════════════════════════════════════════════════════════════════════════
// PROP GROUPS
// ═══════════════════════════════════════════════════════════════════════════════

pub const COMMON: &[&str] = &[
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    "marginX",
    "marginY",
    "m",
    "mt",
    "mr",
    "mb",
    "ml",
    "mx",
    "my",
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "paddingX",
    "paddingY",
    "p",
    "pt",
    "pr",
    "pb",
    "pl",
    "px",
    "py",
    "color",
    "backgroundColor",
    "opacity",
    "bg",
    "display",
];

pub const TYPOGRAPHY: &[&str] = &[
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
    "textAlign",
    "fontStyle",
    "whiteSpace",
];

pub const BORDER: &[&str] = &[
    "border",
    "borderWidth",
    "borderStyle",
    "borderColor",
    "borderRadius",
    "borderTop",
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderRight",
    "borderBottom",
    "borderBottomLeftRadius",
    "borderBottomRightRadius",
    "borderLeft",
    "borderX",
    "borderY",
    "borderTopWidth",
    "borderTopColor",
    "borderTopStyle",
    "borderBottomWidth",
    "borderBottomColor",
    "borderBottomStyle",
    "borderLeftWidth",
    "borderLeftColor",
    "borderLeftStyle",
    "borderRightWidth",
    "borderRightColor",
    "borderRightStyle",
    "boxShadow",
    "textShadow",
];

pub const LAYOUT: &[&str] = &[
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "size",
    "overflow",
    "overflowX",
    "overflowY",
    "display",
    "verticalAlign",
];

pub const POSITION: &[&str] = &["position", "zIndex", "top", "right", "bottom", "left"];

pub const FLEX: &[&str] = &[
    "alignItems",
    "alignContent",
    "justifyItems",
    "justifyContent",
    "flexWrap",
    "flexDirection",
    "flex",
    "flexGrow",
    "flexShrink",
    "flexBasis",
    "justifySelf",
    "alignSelf",
    "order",
];

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Group composition per component kind.
const COMPONENT_GROUPS: &[(&str, &[&[&str]])] = &[
    ("Avatar", &[COMMON]),
    ("AvatarStack", &[COMMON]),
    ("BranchName", &[COMMON]),
    ("Breadcrumb", &[COMMON, FLEX]),
    ("Button", &[COMMON, LAYOUT, TYPOGRAPHY]),
    ("ButtonBase", &[COMMON, LAYOUT]),
    ("ButtonClose", &[COMMON, LAYOUT]),
    ("ButtonTableList", &[COMMON, TYPOGRAPHY, LAYOUT]),
    ("CircleBadge", &[COMMON]),
    ("CounterLabel", &[COMMON]),
    ("Details", &[COMMON]),
    ("Dialog", &[LAYOUT, COMMON, POSITION]),
    ("Dropdown", &[COMMON]),
    ("FilteredSearch", &[COMMON]),
    ("FilterList", &[COMMON]),
    ("Flash", &[COMMON]),
    ("FormGroup", &[COMMON]),
    ("FormGroupLabel", &[COMMON, TYPOGRAPHY]),
    ("Header", &[COMMON, BORDER]),
    ("HeaderItem", &[COMMON, BORDER]),
    ("Label", &[COMMON, BORDER]),
    ("LabelGroup", &[COMMON]),
    ("Link", &[COMMON, TYPOGRAPHY]),
    ("Overlay", &[COMMON]),
    ("Pagehead", &[COMMON]),
    ("Pagination", &[COMMON]),
    ("Popover", &[COMMON, LAYOUT, POSITION]),
    ("PopoverContent", &[COMMON, LAYOUT, POSITION, FLEX]),
    ("SelectMenu", &[COMMON]),
    ("SelectMenuDivider", &[COMMON]),
    ("SelectMenuFilter", &[COMMON]),
    ("SelectMenuFooter", &[COMMON]),
    ("SelectMenuHeader", &[COMMON, TYPOGRAPHY]),
    ("SelectMenuItem", &[COMMON]),
    ("SelectMenuList", &[COMMON]),
    ("SelectMenuLoadingAnimation", &[COMMON]),
    ("SelectMenuModal", &[COMMON]),
    ("SelectMenuTab", &[COMMON]),
    ("SelectMenuTabPanel", &[COMMON]),
    ("SelectMenuTabs", &[COMMON]),
    ("SideNav", &[COMMON]),
    ("Spinner", &[COMMON]),
    ("StateLabel", &[COMMON]),
    ("StyledOcticon", &[COMMON]),
    ("SubNav", &[COMMON, FLEX]),
    ("TabNav", &[COMMON]),
    ("TabNavLink", &[COMMON, TYPOGRAPHY]),
    ("TextInput", &[COMMON]),
    ("Timeline", &[COMMON]),
    ("Tooltip", &[COMMON]),
    ("Truncate", &[TYPOGRAPHY, COMMON]),
    ("UnderlineNav", &[COMMON]),
];

lazy_static! {
    static ref STYLE_PROPS: HashMap<&'static str, HashSet<&'static str>> = {
        let mut m = HashMap::new();
        for (kind, groups) in COMPONENT_GROUPS {
            let props: HashSet<&'static str> =
                groups.iter().flat_map(|group| group.iter().copied()).collect();
            m.insert(*kind, props);
        }
        m
    };
}

/// Returns true if `kind` is a component whose system props are migrated.
pub fn is_registered_kind(kind: &str) -> bool {
    STYLE_PROPS.contains_key(kind)
}

/// Returns true if `attribute` is a system prop of `kind`.
pub fn is_style_prop(kind: &str, attribute: &str) -> bool {
    STYLE_PROPS
        .get(kind)
        .is_some_and(|props| props.contains(attribute))
}

/// The eligible prop set for `kind`, if it is registered.
pub fn style_props(kind: &str) -> Option<&'static HashSet<&'static str>> {
    STYLE_PROPS.get(kind)
}

/// Registered component kinds in table order.
pub fn registered_kinds() -> impl Iterator<Item = &'static str> {
    COMPONENT_GROUPS.iter().map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_only_has_common_props() {
        assert!(is_style_prop("Avatar", "margin"));
        assert!(is_style_prop("Avatar", "color"));
        assert!(!is_style_prop("Avatar", "size"));
        assert!(!is_style_prop("Avatar", "fontSize"));
    }

    #[test]
    fn test_button_composes_layout_and_typography() {
        assert!(is_style_prop("Button", "padding"));
        assert!(is_style_prop("Button", "width"));
        assert!(is_style_prop("Button", "fontWeight"));
        assert!(!is_style_prop("Button", "onClick"));
        assert!(!is_style_prop("Button", "zIndex"));
    }

    #[test]
    fn test_shared_prop_is_counted_once() {
        // display lives in both COMMON and LAYOUT
        let props = style_props("Dialog").unwrap();
        let expected: HashSet<&str> = LAYOUT
            .iter()
            .chain(COMMON)
            .chain(POSITION)
            .copied()
            .collect();
        assert_eq!(props.len(), expected.len());
        assert!(props.contains("display"));
    }

    #[test]
    fn test_unknown_kind_matches_nothing() {
        assert!(!is_registered_kind("Box"));
        assert!(!is_style_prop("Box", "margin"));
        assert!(style_props("Box").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(is_registered_kind("Button"));
        assert!(!is_registered_kind("button"));
        assert!(!is_style_prop("Button", "Margin"));
    }

    #[test]
    fn test_every_kind_is_registered() {
        assert_eq!(registered_kinds().count(), 52);
        for kind in registered_kinds() {
            assert!(is_registered_kind(kind), "{} missing", kind);
        }
    }
}
