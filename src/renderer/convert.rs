//! Rescaling from intrinsic pixels to a physical unit
//!
//! After conversion one user unit equals one target unit: the root size is
//! written in the target unit and the `viewBox`, coordinates and lengths are
//! multiplied by a single factor.

use crate::document::{Attribute, Canvas, ViewBox};
use crate::error::ConversionError;
use crate::geometry::transform::{functions, split_numbers};
use crate::parser::parse_path_data;
use crate::units::{format_number, Length, Unit};

use super::path::to_svg_d;

/// Attributes holding a single coordinate or length
const LENGTH_ATTRIBUTES: &[&str] = &[
    "x",
    "y",
    "width",
    "height",
    "cx",
    "cy",
    "r",
    "rx",
    "ry",
    "x1",
    "y1",
    "x2",
    "y2",
    "fx",
    "fy",
    "dx",
    "dy",
    "refX",
    "refY",
    "stroke-width",
    "stroke-dashoffset",
    "font-size",
    "letter-spacing",
];

/// Elements establishing a nested viewport with their own `viewBox`
const VIEWPORT_ELEMENTS: &[&str] = &["svg", "symbol", "marker", "pattern"];

/// A resolved conversion for one document
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub unit: Unit,
    /// Target units per user unit
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
    pub precision: usize,
}

impl Conversion {
    /// Work out the conversion of a canvas to `target` (or its declared unit)
    pub fn new(
        canvas: &Canvas,
        target: Option<Unit>,
        precision: usize,
    ) -> Result<Self, ConversionError> {
        let unit = match target {
            Some(unit) => unit,
            None => match canvas.unit()? {
                unit if unit.is_physical() => unit,
                _ => Unit::Inch,
            },
        };
        let ppu = unit.px_per_unit();

        let width = canvas.width()?.map(Length::to_px);
        let height = canvas.height()?.map(Length::to_px);
        let view_box = match (canvas.view_box()?, width, height) {
            (Some(vb), _, _) => vb,
            (None, Some(w), Some(h)) => ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: w,
                height: h,
            },
            _ => return Err(ConversionError::MissingDimensions),
        };
        if view_box.width <= 0.0 || view_box.height <= 0.0 {
            return Err(ConversionError::InvalidViewBox(
                canvas.view_box.clone().unwrap_or_default(),
            ));
        }

        // Missing sizes default to the viewBox in pixels
        let width_px = width.unwrap_or(view_box.width);
        let height_px = height.unwrap_or(view_box.height);
        let scale = width_px / view_box.width / ppu;

        Ok(Self {
            unit,
            scale,
            width: width_px / ppu,
            height: height_px / ppu,
            view_box: ViewBox {
                min_x: view_box.min_x * scale,
                min_y: view_box.min_y * scale,
                width: view_box.width * scale,
                height: view_box.height * scale,
            },
            precision,
        })
    }

    fn number(&self, value: f64) -> String {
        format_number(value, self.precision)
    }

    fn length(&self, value: f64) -> String {
        format!("{}{}", self.number(value), self.unit.suffix())
    }

    /// Attributes of the root element with the new size and viewBox
    pub fn root_attributes(&self, attributes: &[Attribute]) -> Vec<Attribute> {
        let view_box = format!(
            "{} {} {} {}",
            self.number(self.view_box.min_x),
            self.number(self.view_box.min_y),
            self.number(self.view_box.width),
            self.number(self.view_box.height)
        );
        let mut result: Vec<Attribute> = attributes
            .iter()
            .map(|attr| match attr.name.as_str() {
                "width" => Attribute::new("width", self.length(self.width)),
                "height" => Attribute::new("height", self.length(self.height)),
                "viewBox" => Attribute::new("viewBox", view_box.clone()),
                _ => attr.clone(),
            })
            .collect();
        for (name, value) in [
            ("width", self.length(self.width)),
            ("height", self.length(self.height)),
            ("viewBox", view_box),
        ] {
            if !result.iter().any(|a| a.name == name) {
                result.push(Attribute::new(name, value));
            }
        }
        result
    }

    /// Rescaled value of an element attribute, or `None` to keep it as written
    pub fn attribute(&self, element: &str, attr: &Attribute) -> Option<String> {
        match attr.name.as_str() {
            "d" if element == "path" => self.path_data(&attr.value),
            "points" | "stroke-dasharray" => self.number_list(&attr.value),
            "viewBox" if VIEWPORT_ELEMENTS.contains(&element) => self.number_list(&attr.value),
            "transform" => self.transform(&attr.value),
            name if LENGTH_ATTRIBUTES.contains(&name) => self.single_length(&attr.value),
            _ => None,
        }
    }

    pub fn path_data(&self, value: &str) -> Option<String> {
        let unescaped = quick_xml::escape::unescape(value).ok()?;
        match parse_path_data(&unescaped) {
            Ok(data) => Some(to_svg_d(&data, self.scale, self.precision)),
            Err(_) => {
                log::warn!("leaving unreadable path data unscaled: {}", value);
                None
            }
        }
    }

    /// A user-space number, optionally suffixed `px`
    fn single_length(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
        let parsed: f64 = number.trim().parse().ok()?;
        Some(self.number(parsed * self.scale))
    }

    fn number_list(&self, value: &str) -> Option<String> {
        let numbers = split_numbers(value)?;
        Some(
            numbers
                .iter()
                .map(|n| self.number(n * self.scale))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Scale the translation parts of a transform list
    fn transform(&self, value: &str) -> Option<String> {
        let mut parts = Vec::new();
        for (name, mut args) in functions(value)? {
            let scaled: &[usize] = match (name, args.len()) {
                ("matrix", 6) => &[4, 5],
                ("translate", 1) => &[0],
                ("translate", 2) => &[0, 1],
                ("rotate", 3) => &[1, 2],
                ("rotate", 1) | ("scale", 1 | 2) | ("skewX", 1) | ("skewY", 1) => &[],
                _ => return None,
            };
            for &i in scaled {
                args[i] *= self.scale;
            }
            let args: Vec<String> = args.iter().map(|a| self.number(*a)).collect();
            parts.push(format!("{}({})", name, args.join(" ")));
        }
        Some(parts.join(" "))
    }
}
