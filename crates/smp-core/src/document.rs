//! Document assembly
//!
//! Concatenates classified entities into the final physics .xml text.
//! Section order is fixed: static-bone defaults, kinematic bones,
//! collision shapes, generic constraints. Entities render in discovery
//! order; nothing is sorted or deduplicated here.

use crate::classify::Classified;
use crate::export::ExportError;

/// Fixed document header; every export opens with this.
pub const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<system xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:noNamespaceSchemaLocation=\"description.xsd\">\n\n";

/// Fixed document footer.
pub const FOOTER: &str = "\n\n</system>\n</xml>";

/// Assemble the full document from classified entities.
///
/// The static-bone section is rendered first so an empty static set aborts
/// before any document text exists; empty kinematic/shape/constraint
/// collections simply emit no block.
pub fn assemble(classified: &Classified) -> Result<String, ExportError> {
    let mut statics = String::new();
    classified.statics.write_xml(&mut statics)?;

    let mut doc = String::with_capacity(statics.len() + 1024);
    doc.push_str(HEADER);
    doc.push_str(&statics);
    for bone in &classified.kinematics {
        bone.write_xml(&mut doc);
    }
    for shape in &classified.shapes {
        shape.write_xml(&mut doc);
    }
    for constraint in &classified.constraints {
        constraint.write_xml(&mut doc);
    }
    doc.push_str(FOOTER);
    Ok(doc)
}

/// Escape a string for use in XML attribute or text content
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render a float the way the host editor prints numbers: shortest
/// round-trip decimal form, keeping a trailing `.0` on integral values.
/// Negative zero (a common artifact of the axis sign flip on disabled
/// components) renders as plain zero.
pub(crate) fn fmt_decimal(v: f32) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::KinematicBone;
    use crate::scene::{BodyKind, RigidBodyDesc};

    #[test]
    fn test_empty_static_set_aborts_with_no_text() {
        let classified = Classified::default();
        assert!(matches!(
            assemble(&classified),
            Err(ExportError::EmptyStaticSet)
        ));
    }

    #[test]
    fn test_section_order() {
        let mut classified = Classified::default();
        classified.statics.push("Root [Passive]");
        let mut body = RigidBodyDesc::new(BodyKind::Driven);
        body.mass = 2.0;
        classified
            .kinematics
            .push(KinematicBone::from_object("Head [Active]", &body));

        let doc = assemble(&classified).unwrap();
        assert!(doc.starts_with(HEADER));
        assert!(doc.ends_with(FOOTER));
        let defaults = doc.find("<bone-default>").unwrap();
        let static_bone = doc.find("<bone name=\"Root\"/>").unwrap();
        let kinematic = doc.find("<bone name=\"Head\">").unwrap();
        assert!(defaults < static_bone);
        assert!(static_bone < kinematic);
    }

    #[test]
    fn test_empty_collections_emit_no_blocks() {
        let mut classified = Classified::default();
        classified.statics.push("Root");
        let doc = assemble(&classified).unwrap();
        assert!(!doc.contains("<generic-constraint"));
        assert!(!doc.contains("-shape"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn test_fmt_decimal() {
        assert_eq!(fmt_decimal(2.0), "2.0");
        assert_eq!(fmt_decimal(0.1), "0.1");
        assert_eq!(fmt_decimal(-3.5), "-3.5");
        assert_eq!(fmt_decimal(0.0), "0.0");
        assert_eq!(fmt_decimal(-0.0), "0.0");
    }
}
