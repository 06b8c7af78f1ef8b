//! The resolution pipeline: converts a PresentationML package into a
//! self-contained, renderer-agnostic JSON description of every slide.
//!
//! Entry point is [`process_presentation`] (C11). Everything else here
//! is the dataflow §2 describes: C11 -> C5 (once) -> per slide: C10 ->
//! background via C3/C2 -> C7 walks the slide shape tree -> each node
//! routes to C8 or C9 -> both use C2/C3/C4 and emit leaf records.

pub mod color;
pub mod dispatcher;
pub mod fill;
pub mod geometry;
pub mod graphic_frame;
pub mod helpers;
pub mod inheritance;
pub mod model;
pub mod orchestrator;
pub mod path_utils;
pub mod resource_graph;
pub mod shape_builder;
pub mod xmltree;

use std::path::Path;

use crate::exc::Result;

pub use model::{ElementRecord, ProcessOutput, SizeRecord, SlideOutput};

/// Parse a PresentationML package from an in-memory archive and resolve
/// every slide into the output JSON tree described in §6.
///
/// Cancellation/failure is all-or-nothing (§5): a package-malformed or
/// part-unreadable error aborts the whole parse; no partial slide output
/// is exposed.
pub fn process_presentation(bytes: &[u8]) -> Result<ProcessOutput> {
    let mut pkg = resource_graph::load_package(bytes)?;
    let slide_paths = pkg.slides.clone();

    let mut slides = Vec::with_capacity(slide_paths.len());
    for slide_path in &slide_paths {
        slides.push(orchestrator::process_slide(&mut pkg, slide_path)?);
    }

    Ok(ProcessOutput {
        size: SizeRecord {
            width: pkg.size.0,
            height: pkg.size.1,
        },
        slides,
    })
}

/// Convenience wrapper reading the package from a file path.
pub fn process_presentation_file<P: AsRef<Path>>(path: P) -> Result<ProcessOutput> {
    let bytes = std::fs::read(path.as_ref())?;
    process_presentation(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn minimal_pptx() -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buf);
            let opts = FileOptions::default();

            zip.start_file("[Content_Types].xml", opts).unwrap();
            zip.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#).unwrap();

            zip.start_file("ppt/presentation.xml", opts).unwrap();
            zip.write_all(br#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#).unwrap();

            zip.start_file("ppt/_rels/presentation.xml.rels", opts).unwrap();
            zip.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
</Relationships>"#).unwrap();

            zip.start_file("ppt/theme/theme1.xml", opts).unwrap();
            zip.write_all(br#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:themeElements><a:clrScheme name="Office">
<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
<a:dk2><a:srgbClr val="44546A"/></a:dk2>
<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
<a:accent1><a:srgbClr val="4472C4"/></a:accent1>
<a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
<a:accent4><a:srgbClr val="FFC000"/></a:accent4>
<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
<a:accent6><a:srgbClr val="70AD47"/></a:accent6>
<a:hlink><a:srgbClr val="0563C1"/></a:hlink>
<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
</a:clrScheme></a:themeElements></a:theme>"#).unwrap();

            zip.start_file("ppt/slideMasters/slideMaster1.xml", opts).unwrap();
            zip.write_all(br#"<p:sldMaster xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/></p:spTree></p:cSld></p:sldMaster>"#).unwrap();

            zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", opts).unwrap();
            zip.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#).unwrap();

            zip.start_file("ppt/slideLayouts/slideLayout1.xml", opts).unwrap();
            zip.write_all(br#"<p:sldLayout xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/></p:spTree></p:cSld></p:sldLayout>"#).unwrap();

            zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", opts).unwrap();
            zip.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#).unwrap();

            zip.start_file("ppt/slides/slide1.xml", opts).unwrap();
            zip.write_all(br#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
<p:cSld><p:spTree>
<p:nvGrpSpPr/><p:grpSpPr/>
<p:sp>
  <p:nvSpPr><p:cNvPr id="2" name="Rect 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
  <p:spPr>
    <a:xfrm><a:off x="914400" y="914400"/><a:ext cx="914400" cy="457200"/></a:xfrm>
    <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
    <a:solidFill><a:srgbClr val="FF0000"/></a:solidFill>
  </p:spPr>
</p:sp>
</p:spTree></p:cSld>
</p:sld>"#).unwrap();

            zip.start_file("ppt/slides/_rels/slide1.xml.rels", opts).unwrap();
            zip.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#).unwrap();

            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn end_to_end_solid_fill_rectangle() {
        let bytes = minimal_pptx();
        let output = process_presentation(&bytes).unwrap();
        assert_eq!(output.slides.len(), 1);
        assert_eq!(output.size.width, 720.0);
        assert_eq!(output.size.height, 540.0);
        match &output.slides[0].elements[0] {
            ElementRecord::Shape(s) => {
                assert_eq!(s.shap_type, "rect");
                assert_eq!(s.geom.left, 72.0);
                assert_eq!(s.geom.top, 72.0);
                assert_eq!(s.geom.width, 72.0);
                assert_eq!(s.geom.height, 36.0);
                assert_eq!(s.fill_color, "#FF0000");
            }
            other => panic!("expected a shape record, got {:?}", other),
        }
    }

    #[test]
    fn missing_content_types_is_package_malformed() {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buf);
            zip.start_file("readme.txt", FileOptions::default()).unwrap();
            zip.write_all(b"not a package").unwrap();
            zip.finish().unwrap();
        }
        let err = process_presentation(&buf.into_inner()).unwrap_err();
        assert!(matches!(err, crate::exc::PptxError::PackageMalformed(_)));
    }
}
