//! SVG markup writer.
//!
//! Output is compact: no XML declaration, no indentation, no whitespace
//! between elements. Geometric attributes come first in their
//! conventional order, followed by the element's own attributes in name
//! order.

use crate::document::{Attributes, Document, Element};
use crate::number::format_number;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serializes a document as a standalone SVG string.
pub fn to_svg_string(document: &Document) -> String {
    let viewport = document.viewport();
    let width = format_number(viewport.width);
    let height = format_number(viewport.height);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\"",
        SVG_NAMESPACE,
        width,
        height,
        format_number(viewport.x),
        format_number(viewport.y),
        width,
        height
    ));

    if document.is_empty() {
        svg.push_str("/>");
        return svg;
    }

    svg.push('>');
    for child in document.children() {
        write_element(&mut svg, child);
    }
    svg.push_str("</svg>");
    svg
}

/// Serializes one element (and its children) as markup.
///
/// This is also the length measure used when choosing between encodings.
pub fn element_markup(element: &Element) -> String {
    let mut markup = String::new();
    write_element(&mut markup, element);
    markup
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag_name());

    match element {
        Element::Group(_) => {}
        Element::Polygon(polygon) => {
            let points = polygon
                .ring()
                .points()
                .iter()
                .map(|p| format!("{},{}", format_number(p.x), format_number(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            push_attribute(out, "points", &points);
        }
        Element::Rect(rect) => {
            let bounds = rect.bounds();
            push_attribute(out, "x", &format_number(bounds.x));
            push_attribute(out, "y", &format_number(bounds.y));
            push_attribute(out, "width", &format_number(bounds.width));
            push_attribute(out, "height", &format_number(bounds.height));
        }
        Element::Path(path) => push_attribute(out, "d", path.data()),
    }
    push_attributes(out, element.attributes());

    match element {
        Element::Group(group) if !group.children.is_empty() => {
            out.push('>');
            for child in &group.children {
                write_element(out, child);
            }
            out.push_str("</g>");
        }
        _ => out.push_str("/>"),
    }
}

fn push_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes {
        push_attribute(out, name, value);
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&xml_escape(value));
    out.push('"');
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
