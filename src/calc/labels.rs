//! Tick labels and axis titles.
//!
//! Labels are placed at the ends of the major gridlines and oriented along the
//! tangent of the crossing lines. Everything that depends on the surface mapping,
//! such as the screen angle of a label, is computed by [`orient_text`] at draw time.

use plotive_carpet_base::geom::{Point, Xy};

use super::gridlines::Gridline;
use crate::des;
use crate::engine::{AxisLetter, CoordinateEngine};
use crate::scale::CoordMapXy;

/// A tick label
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// The axis of the labelled gridline
    pub letter: AxisLetter,
    /// The gridline value
    pub value: f64,
    /// The label text: prefix, formatted value and suffix
    pub text: String,
    /// Whether the text is anchored by its end, which is the case at gridline starts
    pub end_anchor: bool,
    /// Position of the gridline end
    pub xy: Xy,
    /// Tangent of the crossing line at the gridline end
    pub dxy: Xy,
    /// Whether this is the label of the first major gridline
    pub is_first: bool,
    /// Whether this is the label of the last major gridline
    pub is_last: bool,
}

impl Label {
    /// Orient the label on the surface.
    /// A fixed `tick_angle` in degrees overrides the tangent.
    pub fn orientation(
        &self,
        engine: &CoordinateEngine,
        map: &CoordMapXy<'_>,
        tick_angle: Option<f32>,
    ) -> Orientation {
        let dxy = match tick_angle {
            Some(angle) => {
                let rad = (angle as f64 + 180.0).to_radians();
                Xy::new(rad.cos(), rad.sin())
            }
            None => self.dxy,
        };
        orient_text(engine, map, self.xy, dxy, None)
    }

    /// Direction in which the text extends from its anchor along the oriented baseline:
    /// `1.0` if the text starts at the anchor, `-1.0` if it ends there.
    pub fn direction(&self, orientation: &Orientation) -> f64 {
        let anchor = if self.end_anchor { -1.0 } else { 1.0 };
        anchor * orientation.flip
    }
}

/// Compute the tick labels of the major gridlines of an axis
pub fn calc_labels(
    engine: &CoordinateEngine,
    letter: AxisLetter,
    axis: &des::CarpetAxis,
    major: &[Gridline],
) -> Vec<Label> {
    let show = axis.show_tick_labels();
    if !show.at_start() && !show.at_end() {
        return Vec::new();
    }

    let prefix = axis.label_prefix(letter);
    let suffix = axis.label_suffix();
    let format = axis.label_format();

    let mut labels = Vec::new();
    let count = major.len();
    for (idx, gl) in major.iter().enumerate() {
        let text = format!("{prefix}{}{suffix}", format.format(gl.value));
        let cross = gl.cross_len(engine);
        let is_first = idx == 0;
        let is_last = idx + 1 == count;

        if show.at_start() {
            labels.push(Label {
                letter,
                value: gl.value,
                text: text.clone(),
                end_anchor: true,
                xy: gl.xy(engine, 0.0),
                dxy: gl.dxy(engine, 0, 0.0),
                is_first,
                is_last,
            });
        }
        if show.at_end() {
            labels.push(Label {
                letter,
                value: gl.value,
                text,
                end_anchor: false,
                xy: gl.xy(engine, (cross - 1) as f64),
                dxy: gl.dxy(engine, cross - 2, 1.0),
                is_first,
                is_last,
            });
        }
    }
    labels
}

/// Orientation of a text on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Rotation of the baseline in degrees, within `[-90, 90]` so that text is never upside down
    pub angle: f64,
    /// `-1.0` if the baseline runs opposite to the tangent, `1.0` otherwise
    pub flip: f64,
    /// The anchor position on the surface
    pub p: Point,
    /// Cosine between the tangent and the reference direction, clamped to positive values.
    /// `1.0` without reference direction.
    pub offset_multiplier: f64,
}

/// Orient a text placed at `xy` along the cartesian tangent `dxy`.
///
/// When `ref_dxy` is given, the offset multiplier measures how much the tangent
/// follows the reference direction.
pub fn orient_text(
    engine: &CoordinateEngine,
    map: &CoordMapXy<'_>,
    xy: Xy,
    dxy: Xy,
    ref_dxy: Option<Xy>,
) -> Orientation {
    let dx = dxy.x * map.dpdx();
    let dy = dxy.y * map.dpdy();

    let offset_multiplier = match ref_dxy {
        Some(r) => (dxy.dot(r) / dxy.norm() / r.norm()).max(0.0),
        None => 1.0,
    };

    let mut angle = dy.atan2(dx).to_degrees();
    let mut flip = 1.0;
    if angle < -90.0 {
        angle += 180.0;
        flip = -flip;
    } else if angle > 90.0 {
        angle -= 180.0;
        flip = -flip;
    }

    Orientation {
        angle,
        flip,
        p: engine.c2p(xy, map),
        offset_multiplier,
    }
}

/// Anchor of an axis title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleAnchor {
    /// The titled axis
    pub letter: AxisLetter,
    /// Position of the title
    pub xy: Xy,
    /// Tangent of the axis at the title position
    pub dxy: Xy,
    /// Tangent of the crossing axis at the title position,
    /// to orient the title when the axis has no label
    pub cross_dxy: Xy,
}

/// Anchor of the title of axis `letter`.
///
/// The a title sits in the middle of the a range, on the lowest b value,
/// and conversely for the b title. Tangents are rough derivatives.
pub fn axis_title_anchor(engine: &CoordinateEngine, letter: AxisLetter) -> TitleAnchor {
    let ab = engine.a_bounds();
    let bb = engine.b_bounds();
    let (a, b) = match letter {
        AxisLetter::A => (ab.center(), bb.min()),
        AxisLetter::B => (ab.min(), bb.center()),
    };
    let xy = engine.ab2xy_extrapolated(a, b);
    let da = engine.dxyda_rough(a, b, None);
    let db = engine.dxydb_rough(a, b, None);
    let (dxy, cross_dxy) = match letter {
        AxisLetter::A => (da, db),
        AxisLetter::B => (db, da),
    };
    TitleAnchor {
        letter,
        xy,
        dxy,
        cross_dxy,
    }
}

/// Whether a title must be placed on the other side of its axis line,
/// so that it does not overlap the labels oriented by `labels`.
pub fn title_is_reversed(labels: &Orientation, title: &Orientation) -> bool {
    let label_norm = labels.angle + if labels.flip < 0.0 { 180.0 } else { 0.0 };
    let diff = (label_norm - title.angle + 450.0).rem_euclid(360.0);
    diff > 90.0 && diff < 270.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Smoothing;
    use crate::calc::gridlines::calc_gridlines;
    use crate::data::Grid;
    use crate::scale::LinCoordMap;
    use crate::tests::{Near, assert_near};

    fn engine() -> CoordinateEngine {
        let x = Grid::from_fn(3, 2, |_, i| i as f64);
        let y = Grid::from_fn(3, 2, |j, _| 10.0 * j as f64);
        CoordinateEngine::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 10.0],
            x,
            y,
            Smoothing::Linear,
            Smoothing::Linear,
        )
    }

    fn maps() -> (LinCoordMap, LinCoordMap) {
        (
            LinCoordMap::new(100.0, (0.0, 0.0), (0.0, 2.0).into()),
            LinCoordMap::new(100.0, (0.0, 0.0), (0.0, 10.0).into()).reversed(),
        )
    }

    #[test]
    fn labels_at_both_ends() {
        let e = engine();
        let axis = des::CarpetAxis::new().with_show_tick_labels(des::ShowTickLabels::Both);
        let lines = calc_gridlines(&e, AxisLetter::A, &axis);
        let labels = calc_labels(&e, AxisLetter::A, &axis, &lines.major);
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0].text, "a = 0");
        assert!(labels[0].end_anchor && labels[0].is_first);
        assert!(!labels[1].end_anchor);
        assert_near!(abs, labels[1].xy.y, 10.0);
        assert_near!(abs, labels[1].dxy.y, 10.0);
        assert!(labels[5].is_last);
    }

    #[test]
    fn label_text() {
        let e = engine();
        let axis = des::CarpetAxis::new()
            .with_label_prefix("")
            .with_label_suffix(" m")
            .with_label_format(des::LabelFormat::Prec(1));
        let lines = calc_gridlines(&e, AxisLetter::B, &axis);
        let labels = calc_labels(&e, AxisLetter::B, &axis, &lines.major);
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0.0 m", "10.0 m"]);

        let axis = axis.with_show_tick_labels(des::ShowTickLabels::None);
        assert!(calc_labels(&e, AxisLetter::B, &axis, &lines.major).is_empty());
    }

    #[test]
    fn orientation() {
        let e = engine();
        let (xm, ym) = maps();
        let map = CoordMapXy::new(&xm, &ym);

        // along +x: horizontal
        let o = orient_text(&e, &map, Xy::new(1.0, 5.0), Xy::new(1.0, 0.0), None);
        assert_near!(abs, o.angle, 0.0);
        assert_eq!(o.flip, 1.0);
        assert_near!(abs, o.p.x, 50.0, 1e-4);

        // along -x: flipped
        let o = orient_text(&e, &map, Xy::new(1.0, 5.0), Xy::new(-1.0, 0.0), None);
        assert_near!(abs, o.angle.abs(), 0.0);
        assert_eq!(o.flip, -1.0);

        // along +y, which points up on the surface
        let o = orient_text(&e, &map, Xy::new(1.0, 5.0), Xy::new(0.0, 1.0), None);
        assert_near!(abs, o.angle, -90.0);

        let o = orient_text(
            &e,
            &map,
            Xy::new(1.0, 5.0),
            Xy::new(1.0, 1.0),
            Some(Xy::new(1.0, 0.0)),
        );
        assert_near!(abs, o.offset_multiplier, 0.5f64.sqrt());
    }

    #[test]
    fn fixed_tick_angle() {
        let e = engine();
        let (xm, ym) = maps();
        let map = CoordMapXy::new(&xm, &ym);
        let axis = des::CarpetAxis::new();
        let lines = calc_gridlines(&e, AxisLetter::A, &axis);
        let labels = calc_labels(&e, AxisLetter::A, &axis, &lines.major);
        let o = labels[0].orientation(&e, &map, Some(0.0));
        assert_near!(abs, o.angle, 0.0, 1e-9);
        assert_eq!(o.flip, -1.0);
        assert_eq!(labels[0].direction(&o), 1.0);
    }

    #[test]
    fn title_anchors() {
        let e = engine();
        let t = axis_title_anchor(&e, AxisLetter::A);
        assert_near!(abs, t.xy.x, 1.0);
        assert_near!(abs, t.xy.y, 0.0);
        assert_near!(abs, t.dxy.x, 1.0);
        assert_near!(abs, t.cross_dxy.y, 1.0);
        let t = axis_title_anchor(&e, AxisLetter::B);
        assert_near!(abs, t.xy.x, 0.0);
        assert_near!(abs, t.xy.y, 5.0);
        assert_near!(abs, t.dxy.y, 1.0);
    }

    #[test]
    fn reversed_title() {
        let p = Point::zero();
        let o = |angle, flip| Orientation {
            angle,
            flip,
            p,
            offset_multiplier: 1.0,
        };
        assert!(!title_is_reversed(&o(0.0, 1.0), &o(90.0, 1.0)));
        assert!(title_is_reversed(&o(0.0, -1.0), &o(90.0, 1.0)));
    }
}
