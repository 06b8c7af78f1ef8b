//! Geometry Resolver (C4): position/size inherited through the
//! slide/layout/master `a:xfrm` chain, plus group coordinate-system
//! remapping.

use crate::reader::path_utils::{angle_to_degrees, emu_to_pt};
use crate::reader::xmltree::XmlNode;

/// A fully resolved box in points, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2D {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Box2D {
    fn default() -> Self {
        Box2D {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Rotation/flip state carried alongside geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    pub rotate: i32,
    pub flip_h: bool,
    pub flip_v: bool,
}

fn off_of(xfrm: &XmlNode) -> Option<(f64, f64)> {
    let off = xfrm.child("off")?;
    Some((
        emu_to_pt(off.attr_i64("x")?),
        emu_to_pt(off.attr_i64("y")?),
    ))
}

fn ext_of(xfrm: &XmlNode) -> Option<(f64, f64)> {
    let ext = xfrm.child("ext")?;
    Some((
        emu_to_pt(ext.attr_i64("cx")?),
        emu_to_pt(ext.attr_i64("cy")?),
    ))
}

/// Position via the slide ▸ layout ▸ master `a:xfrm` chain: the first
/// node that carries `a:off` wins; missing at every level -> (0, 0).
pub fn position(slide_xfrm: Option<&XmlNode>, layout_xfrm: Option<&XmlNode>, master_xfrm: Option<&XmlNode>) -> (f64, f64) {
    for x in [slide_xfrm, layout_xfrm, master_xfrm].into_iter().flatten() {
        if let Some(off) = off_of(x) {
            return off;
        }
    }
    (0.0, 0.0)
}

/// Size via the same chain, using `a:ext`.
pub fn size(slide_xfrm: Option<&XmlNode>, layout_xfrm: Option<&XmlNode>, master_xfrm: Option<&XmlNode>) -> (f64, f64) {
    for x in [slide_xfrm, layout_xfrm, master_xfrm].into_iter().flatten() {
        if let Some(ext) = ext_of(x) {
            return ext;
        }
    }
    (0.0, 0.0)
}

/// Resolve a full box plus rotation/flip through the inheritance chain.
pub fn resolve_box(
    slide_xfrm: Option<&XmlNode>,
    layout_xfrm: Option<&XmlNode>,
    master_xfrm: Option<&XmlNode>,
) -> (Box2D, Transform) {
    let (left, top) = position(slide_xfrm, layout_xfrm, master_xfrm);
    let (width, height) = size(slide_xfrm, layout_xfrm, master_xfrm);
    let rotate_source = [slide_xfrm, layout_xfrm, master_xfrm]
        .into_iter()
        .flatten()
        .find(|x| x.attr("rot").is_some());
    let rotate = angle_to_degrees(rotate_source.and_then(|x| x.attr_i64("rot")));
    let flip_h = [slide_xfrm, layout_xfrm, master_xfrm]
        .into_iter()
        .flatten()
        .find_map(|x| x.attr("flipH"))
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let flip_v = [slide_xfrm, layout_xfrm, master_xfrm]
        .into_iter()
        .flatten()
        .find_map(|x| x.attr("flipV"))
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    (
        Box2D { left, top, width, height },
        Transform { rotate, flip_h, flip_v },
    )
}

/// A group's own transform: outer box (`off`/`ext`) plus child coordinate
/// system (`chOff`/`chExt`).
#[derive(Debug, Clone, Copy)]
pub struct GroupTransform {
    pub outer: Box2D,
    pub ch_off: (f64, f64),
    pub ch_ext: (f64, f64),
    pub rotate: i32,
}

pub fn group_transform(grp_xfrm: &XmlNode) -> GroupTransform {
    let outer_off = off_of(grp_xfrm).unwrap_or((0.0, 0.0));
    let outer_ext = ext_of(grp_xfrm).unwrap_or((0.0, 0.0));
    let ch_off = grp_xfrm
        .child("chOff")
        .and_then(|n| Some((emu_to_pt(n.attr_i64("x")?), emu_to_pt(n.attr_i64("y")?))))
        .unwrap_or((0.0, 0.0));
    let ch_ext = grp_xfrm
        .child("chExt")
        .and_then(|n| Some((emu_to_pt(n.attr_i64("cx")?), emu_to_pt(n.attr_i64("cy")?))))
        .unwrap_or(outer_ext);
    GroupTransform {
        outer: Box2D {
            left: outer_off.0,
            top: outer_off.1,
            width: outer_ext.0,
            height: outer_ext.1,
        },
        ch_off,
        ch_ext,
        rotate: angle_to_degrees(grp_xfrm.attr_i64("rot")),
    }
}

/// Re-express a child's already-resolved box in the group's frame:
/// `((left - chx) * sx, (top - chy) * sy, width * sx, height * sy)`.
/// The child's rotation/fills/colors are untouched by this step.
pub fn remap_into_group(child: Box2D, group: &GroupTransform) -> Box2D {
    let sx = if group.ch_ext.0.abs() > 1e-9 {
        group.outer.width / group.ch_ext.0
    } else {
        1.0
    };
    let sy = if group.ch_ext.1.abs() > 1e-9 {
        group.outer.height / group.ch_ext.1
    } else {
        1.0
    };
    Box2D {
        left: group.outer.left + (child.left - group.ch_off.0) * sx,
        top: group.outer.top + (child.top - group.ch_off.1) * sy,
        width: child.width * sx,
        height: child.height * sy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::xmltree::parse;

    #[test]
    fn position_falls_through_chain() {
        let slide = parse(br#"<a:xfrm><a:ext cx="100" cy="200"/></a:xfrm>"#).unwrap();
        let layout = parse(br#"<a:xfrm><a:off x="10" y="20"/></a:xfrm>"#).unwrap();
        let (left, top) = position(Some(&slide), Some(&layout), None);
        assert_eq!((left, top), (emu_to_pt(10), emu_to_pt(20)));
    }

    #[test]
    fn missing_everywhere_yields_zero_box() {
        let (pos, _) = resolve_box(None, None, None);
        assert_eq!(pos, Box2D::default());
    }

    #[test]
    fn group_identity_when_ch_matches_outer() {
        let grp = parse(
            br#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="914400"/><a:chOff x="0" y="0"/><a:chExt cx="914400" cy="914400"/></a:xfrm>"#,
        )
        .unwrap();
        let gt = group_transform(&grp);
        let child = Box2D {
            left: 36.0,
            top: 18.0,
            width: 10.0,
            height: 5.0,
        };
        let remapped = remap_into_group(child, &gt);
        assert!((remapped.left - child.left).abs() < 1e-9);
        assert!((remapped.width - child.width).abs() < 1e-9);
    }

    #[test]
    fn group_remap_scales_child_into_parent_frame() {
        // off=(0,0) ext=(2000,1000) chOff=(0,0) chExt=(1000,500), child at
        // (500,250) size (100,100) in EMU-already-as-points units for the test.
        let grp = GroupTransform {
            outer: Box2D { left: 0.0, top: 0.0, width: 2000.0, height: 1000.0 },
            ch_off: (0.0, 0.0),
            ch_ext: (1000.0, 500.0),
            rotate: 0,
        };
        let child = Box2D { left: 500.0, top: 250.0, width: 100.0, height: 100.0 };
        let remapped = remap_into_group(child, &grp);
        assert_eq!(remapped.left, 1000.0);
        assert_eq!(remapped.top, 500.0);
        assert_eq!(remapped.width, 200.0);
        assert_eq!(remapped.height, 200.0);
    }
}
