//! Color Engine (C2): decodes a single OOXML color subtree into a
//! `#RRGGBB`/`#RRGGBBAA` string, including scheme-color indirection and
//! the fixed HSL modulation chain (alpha, hueMod, lumMod, lumOff, satMod,
//! shade, tint). Order is fixed by §4.2 and must not be reordered — the
//! modulations do not commute.

use std::collections::HashMap;

use crate::reader::path_utils::pct;
use crate::reader::xmltree::XmlNode;

/// The theme's resolved color scheme: the eight named slots
/// (`dk1, lt1, dk2, lt2, accent1..6, hlink, folHlink`) each as a bare hex
/// `RRGGBB` string.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub scheme: HashMap<String, String>,
}

impl Theme {
    pub fn from_theme_xml(root: &XmlNode) -> Theme {
        let mut scheme = HashMap::new();
        if let Some(clr_scheme) = root.lookup(&["themeElements", "clrScheme"]) {
            for child in &clr_scheme.children {
                if let Some(hex) = scheme_slot_color(child) {
                    scheme.insert(child.name.clone(), hex);
                }
            }
        }
        Theme { scheme }
    }
}

fn scheme_slot_color(slot_node: &XmlNode) -> Option<String> {
    if let Some(srgb) = slot_node.child("srgbClr") {
        return srgb.attr("val").map(|v| v.to_uppercase());
    }
    if let Some(sys) = slot_node.child("sysClr") {
        return sys
            .attr("lastClr")
            .or_else(|| sys.attr("val"))
            .map(|v| v.to_uppercase());
    }
    None
}

/// The active color-map slot substitution (slide override ▸ layout
/// override ▸ master `p:clrMap`). Defaults mirror the standard OOXML
/// identity map when a slot is never overridden.
#[derive(Debug, Clone)]
pub struct ClrMap {
    map: HashMap<String, String>,
}

impl Default for ClrMap {
    fn default() -> Self {
        let mut map = HashMap::new();
        for (k, v) in [
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ] {
            map.insert(k.to_string(), v.to_string());
        }
        ClrMap { map }
    }
}

impl ClrMap {
    /// Build a ClrMap from a `p:clrMap` (or `p:clrMapOvr/a:overrideClrMapping`)
    /// node's attributes, falling back to the standard identity map for any
    /// slot the node doesn't specify.
    pub fn from_node(node: &XmlNode) -> ClrMap {
        let mut m = ClrMap::default();
        for (k, v) in &node.attrs {
            m.map.insert(k.clone(), v.clone());
        }
        m
    }

    /// Fold an override node's slot attributes over this map in place,
    /// replacing only the slots the override specifies. Used to layer
    /// slide/layout `p:clrMapOvr/a:overrideClrMapping` on top of the
    /// master's `p:clrMap` (§4.2: slide override ▸ layout override ▸
    /// master `clrMap`).
    pub fn overlay(&mut self, node: &XmlNode) {
        for (k, v) in &node.attrs {
            self.map.insert(k.clone(), v.clone());
        }
    }

    pub fn slot_for(&self, name: &str) -> &str {
        self.map.get(name).map(|s| s.as_str()).unwrap_or(name)
    }
}

/// Resolve a `schemeClr`'s `val` (e.g. `"accent1"`) through the active
/// color map into the theme and return its hex color. `phClr` supports
/// the placeholder-color-inheritance sentinel: when `name == "phClr"`,
/// the caller's inherited run color is substituted verbatim.
pub fn resolve_scheme(name: &str, theme: &Theme, clr_map: &ClrMap, ph_clr: Option<&str>) -> String {
    if name == "phClr" {
        return ph_clr.unwrap_or("").to_string();
    }
    let slot = clr_map.slot_for(name);
    theme
        .scheme
        .get(slot)
        .cloned()
        .unwrap_or_else(|| "000000".to_string())
}

/// RGB preset color name table (OOXML `prstClr`), the common subset.
fn preset_color(name: &str) -> Option<&'static str> {
    Some(match name {
        "black" => "000000",
        "white" => "FFFFFF",
        "red" => "FF0000",
        "green" => "008000",
        "blue" => "0000FF",
        "yellow" => "FFFF00",
        "orange" => "FFA500",
        "purple" => "800080",
        "gray" | "grey" => "808080",
        "silver" => "C0C0C0",
        "maroon" => "800000",
        "navy" => "000080",
        "olive" => "808000",
        "teal" => "008080",
        "lime" => "00FF00",
        "aqua" | "cyan" => "00FFFF",
        "fuchsia" | "magenta" => "FF00FF",
        "pink" => "FFC0CB",
        "brown" => "A52A2A",
        "transparent" => "FFFFFF",
        _ => return None,
    })
}

struct Rgb {
    r: u8,
    g: u8,
    b: u8,
    alpha: Option<u8>,
}

fn parse_hex6(s: &str) -> Rgb {
    let s = s.trim_start_matches('#');
    let r = u8::from_str_radix(s.get(0..2).unwrap_or("00"), 16).unwrap_or(0);
    let g = u8::from_str_radix(s.get(2..4).unwrap_or("00"), 16).unwrap_or(0);
    let b = u8::from_str_radix(s.get(4..6).unwrap_or("00"), 16).unwrap_or(0);
    Rgb { r, g, b, alpha: None }
}

fn format_hex(rgb: &Rgb) -> String {
    let mut s = format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b);
    if let Some(a) = rgb.alpha {
        s.push_str(&format!("{:02X}", a));
    }
    s
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < 1e-9 {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        ((g - b) / d) % 6.0 + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    } * 60.0;
    (h.rem_euclid(360.0), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s.abs() < 1e-9 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r1, g1, b1) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((g1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((b1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// Decode a color element (`a:srgbClr`, `a:schemeClr`, `a:scrgbClr`,
/// `a:prstClr`, `a:hslClr`, or `a:sysClr`) plus its modifier children into
/// a final `#RRGGBB` or `#RRGGBBAA` string.
pub fn decode_color(
    color_el: &XmlNode,
    theme: &Theme,
    clr_map: &ClrMap,
    ph_clr: Option<&str>,
) -> String {
    let mut rgb = match color_el.name.as_str() {
        "srgbClr" => parse_hex6(color_el.attr_or("val", "000000")),
        "schemeClr" => {
            let name = color_el.attr_or("val", "bg1");
            let hex = resolve_scheme(name, theme, clr_map, ph_clr);
            parse_hex6(&hex)
        }
        "scrgbClr" => {
            let r = pct(color_el.attr_or("r", "0")).unwrap_or(0.0);
            let g = pct(color_el.attr_or("g", "0")).unwrap_or(0.0);
            let b = pct(color_el.attr_or("b", "0")).unwrap_or(0.0);
            Rgb {
                r: (r * 255.0).round().clamp(0.0, 255.0) as u8,
                g: (g * 255.0).round().clamp(0.0, 255.0) as u8,
                b: (b * 255.0).round().clamp(0.0, 255.0) as u8,
                alpha: None,
            }
        }
        "prstClr" => {
            let name = color_el.attr_or("val", "black");
            parse_hex6(preset_color(name).unwrap_or("000000"))
        }
        "hslClr" => {
            let hue = color_el.attr_f64("hue").unwrap_or(0.0) / 100000.0;
            let sat = pct(color_el.attr_or("sat", "0")).unwrap_or(0.0);
            let lum = pct(color_el.attr_or("lum", "0")).unwrap_or(0.0);
            let (r, g, b) = hsl_to_rgb(hue, sat, lum);
            Rgb { r, g, b, alpha: None }
        }
        "sysClr" => {
            let hex = color_el
                .attr("lastClr")
                .unwrap_or(color_el.attr_or("val", "000000"));
            parse_hex6(hex)
        }
        _ => parse_hex6("000000"),
    };

    let mut is_alpha = false;
    if let Some(alpha_node) = color_el.child("alpha") {
        if let Some(a) = pct(alpha_node.attr_or("val", "100000")) {
            rgb.alpha = Some((a.clamp(0.0, 1.0) * 255.0).round() as u8);
            is_alpha = true;
        }
    }

    for modifier in ["hueMod", "lumMod", "lumOff", "satMod", "shade", "tint"] {
        let Some(mod_node) = color_el.child(modifier) else {
            continue;
        };
        let Some(val) = pct(mod_node.attr_or("val", "0")) else {
            continue;
        };
        let (mut h, mut s, mut l) = rgb_to_hsl(rgb.r, rgb.g, rgb.b);
        match modifier {
            "hueMod" => h = (h * val).rem_euclid(360.0),
            "lumMod" => l *= val,
            "lumOff" => l += val,
            "satMod" => s *= val,
            "shade" => l *= val,
            "tint" => l += (1.0 - l) * val,
            _ => {}
        }
        let (r, g, b) = hsl_to_rgb(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
        rgb.r = r;
        rgb.g = g;
        rgb.b = b;
    }

    if !is_alpha {
        rgb.alpha = None;
    }
    format_hex(&rgb)
}

/// Resolve whichever single color child a container node (`a:solidFill`
/// and friends) carries. Returns `None` if no recognized color element is
/// present.
pub fn decode_container(
    container: &XmlNode,
    theme: &Theme,
    clr_map: &ClrMap,
    ph_clr: Option<&str>,
) -> Option<String> {
    for kind in ["srgbClr", "schemeClr", "scrgbClr", "prstClr", "hslClr", "sysClr"] {
        if let Some(el) = container.child(kind) {
            return Some(decode_color(el, theme, clr_map, ph_clr));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::xmltree::parse;

    fn theme_with_accent1(hex: &str) -> Theme {
        let mut scheme = HashMap::new();
        scheme.insert("accent1".to_string(), hex.to_string());
        Theme { scheme }
    }

    #[test]
    fn lum_mod_one_lum_off_zero_is_identity() {
        let xml = br#"<a:srgbClr val="4472C4"><a:lumMod val="100000"/><a:lumOff val="0"/></a:srgbClr>"#;
        let node = parse(xml).unwrap();
        let theme = Theme::default();
        let out = decode_color(&node, &theme, &ClrMap::default(), None);
        assert_eq!(out, "#4472C4");
    }

    #[test]
    fn tint_one_yields_white() {
        let xml = br#"<a:srgbClr val="123456"><a:tint val="100000"/></a:srgbClr>"#;
        let node = parse(xml).unwrap();
        let theme = Theme::default();
        let out = decode_color(&node, &theme, &ClrMap::default(), None);
        assert_eq!(out, "#FFFFFF");
    }

    #[test]
    fn shade_zero_yields_black() {
        let xml = br#"<a:srgbClr val="123456"><a:shade val="0"/></a:srgbClr>"#;
        let node = parse(xml).unwrap();
        let theme = Theme::default();
        let out = decode_color(&node, &theme, &ClrMap::default(), None);
        assert_eq!(out, "#000000");
    }

    #[test]
    fn alpha_one_round_trips_to_six_digit_form() {
        let xml = br#"<a:srgbClr val="FF0000"><a:alpha val="100000"/></a:srgbClr>"#;
        let node = parse(xml).unwrap();
        let theme = Theme::default();
        let out = decode_color(&node, &theme, &ClrMap::default(), None);
        assert_eq!(out, "#FF0000FF");
    }

    #[test]
    fn scheme_color_with_lum_mod_and_lum_off() {
        let xml = br#"<a:schemeClr val="accent1"><a:lumMod val="75000"/><a:lumOff val="25000"/></a:schemeClr>"#;
        let node = parse(xml).unwrap();
        let theme = theme_with_accent1("4472C4");
        let out = decode_color(&node, &theme, &ClrMap::default(), None);
        // L' = L*0.75 + 0.25, channel re-encoded; just assert it differs
        // from the unmodulated base and is a well-formed 6-digit hex.
        assert_ne!(out, "#4472C4");
        assert!(out.starts_with('#') && out.len() == 7);
    }

    #[test]
    fn overlay_replaces_only_the_slots_the_override_names() {
        let master = parse(br#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2"/>"#).unwrap();
        let mut clr_map = ClrMap::from_node(&master);
        let slide_override = parse(br#"<a:overrideClrMapping bg1="dk1"/>"#).unwrap();
        clr_map.overlay(&slide_override);
        assert_eq!(clr_map.slot_for("bg1"), "dk1");
        // Untouched slots still fall through to the master's mapping.
        assert_eq!(clr_map.slot_for("tx1"), "dk1");
        assert_eq!(clr_map.slot_for("bg2"), "lt2");
    }

    #[test]
    fn phclr_sentinel_passes_through() {
        let xml = br#"<a:schemeClr val="phClr"/>"#;
        let node = parse(xml).unwrap();
        let theme = Theme::default();
        let out = decode_color(&node, &theme, &ClrMap::default(), Some("#ABCDEF"));
        assert_eq!(out, "#ABCDEF");
    }
}
