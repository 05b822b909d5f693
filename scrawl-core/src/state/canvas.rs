//! # Canvas
//!
//! One page of annotations: strokes in z-order and text boxes. The canvas decides which strokes are
//! hidden by later erasing (occlusion culling), undoes the most recent stroke, and flattens itself
//! into a [`Record`].

use bitvec::vec::BitVec;

use super::drawing::{Drawing, DrawingID};
use super::text::{Text, TextID};
use crate::geometry::{Rect, Size};
use crate::labels::Labels;
use crate::notify::{Event, Notifier};
use crate::serialize::{self, DecodeDiagnostic, Record, RecordExt, Serializable};
use crate::tool::ToolGeometryError;

/// Fixed logical surface all culling geometry is computed against, regardless of zoom.
pub const CULLING_SIZE: Size = Size::new(1000.0, 1000.0);

#[derive(Debug)]
pub struct Canvas {
    index: i64,
    /// Insertion order is z-order, last on top.
    drawings: Vec<Drawing>,
    /// Unique by ID.
    text: Vec<Text>,
    notifier: Notifier,
}
/// Clones get their own [`Notifier`], with no observers. Use [`Canvas::set_notifier`] to share one.
impl Clone for Canvas {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            drawings: self.drawings.clone(),
            text: self.text.clone(),
            notifier: Notifier::default(),
        }
    }
}
impl Canvas {
    #[must_use]
    pub fn new(index: i64) -> Self {
        Self {
            index,
            drawings: Vec::new(),
            text: Vec::new(),
            notifier: Notifier::default(),
        }
    }
    #[must_use]
    pub fn index(&self) -> i64 {
        self.index
    }
    /// Where clear and undo are announced.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.notifier = notifier;
    }
}
// Drawings
impl Canvas {
    #[must_use]
    pub fn all_drawings(&self) -> &[Drawing] {
        &self.drawings
    }
    /// Strokes a renderer should draw, bottom to top. Accurate as of the last culling pass.
    pub fn visible_drawings(&self) -> impl Iterator<Item = &Drawing> + '_ {
        self.drawings.iter().filter(|drawing| !drawing.is_culled)
    }
    /// Place a stroke on top of all others.
    ///
    /// Culling is *not* updated. Call [`Canvas::perform_occlusion_culling`] before trusting
    /// [`Drawing::is_culled`].
    pub fn add_drawing(&mut self, drawing: Drawing) {
        self.drawings.push(drawing);
    }
    // O(n). IDs are not required to be unique nor ordered, so there's no index to keep.
    /// The first stroke with this ID, bottom to top.
    #[must_use]
    pub fn drawing(&self, id: DrawingID) -> Option<&Drawing> {
        self.drawings.iter().find(|drawing| drawing.id() == id)
    }
    /// Remove the first stroke with this ID, bottom to top. `None` if there is none.
    pub fn remove_drawing(&mut self, id: DrawingID) -> Option<Drawing> {
        let position = self.drawings.iter().position(|drawing| drawing.id() == id)?;
        Some(self.drawings.remove(position))
    }
}
// Text
impl Canvas {
    #[must_use]
    pub fn all_text(&self) -> &[Text] {
        &self.text
    }
    /// Append `text`, replacing any existing text with the same ID.
    /// The replacement goes to the end, not to the replaced text's position.
    pub fn add_text(&mut self, text: Text) {
        let id = text.id();
        self.text.retain(|existing| existing.id() != id);
        self.text.push(text);
    }
    #[must_use]
    pub fn text(&self, id: TextID) -> Option<&Text> {
        self.text.iter().find(|text| text.id() == id)
    }
    /// Edit text in place. Emptied text is removed by the next culling pass.
    #[must_use]
    pub fn text_mut(&mut self, id: TextID) -> Option<&mut Text> {
        self.text.iter_mut().find(|text| text.id() == id)
    }
    pub fn remove_text(&mut self, id: TextID) -> Option<Text> {
        let position = self.text.iter().position(|text| text.id() == id)?;
        Some(self.text.remove(position))
    }
    /// Empty both strokes and text, announcing it immediately.
    pub fn clear(&mut self) {
        self.drawings.clear();
        self.text.clear();
        self.notifier
            .post_now(&Event::CanvasCleared { canvas: self.index });
    }
}
// Culling
impl Canvas {
    /// Recompute [`Drawing::is_culled`] for every stroke, then drop empty text.
    ///
    /// A stroke is culled when some *later* eraser stroke's area fully contains it. Partial overlap
    /// never culls, and non-eraser strokes never hide anything.
    ///
    /// The pass is all-or-nothing: if any stroke's path fails to build, no flag is changed, text is
    /// left alone, and the error is returned. Eraser strokes may still have dropped points which lie
    /// off the culling surface, as that never changes what they erase.
    /// # Errors
    /// The first [`ToolGeometryError`] met, topmost stroke first.
    pub fn perform_occlusion_culling(&mut self) -> Result<(), ToolGeometryError> {
        for drawing in self
            .drawings
            .iter_mut()
            .filter(|drawing| drawing.tool.is_eraser())
        {
            drawing.prune_out_of_bounds(CULLING_SIZE);
        }

        let flags = occlusion_flags(&self.drawings, CULLING_SIZE)?;
        for ((drawing, touched), culled) in self
            .drawings
            .iter_mut()
            .zip(flags.touched.iter().by_vals())
            .zip(flags.culled.iter().by_vals())
        {
            if touched {
                drawing.is_culled = culled;
            }
        }
        log::trace!(
            "canvas {}: {} of {} strokes culled",
            self.index,
            flags.culled.count_ones(),
            self.drawings.len()
        );

        self.perform_text_culling();
        Ok(())
    }
    /// Remove every text whose value is empty.
    pub fn perform_text_culling(&mut self) {
        self.text.retain(|text| !text.is_empty());
    }
}

/// Result of a culling pass, indexed like the strokes it ran over.
struct CullFlags {
    /// Strokes whose path could be built. Others keep their old flag.
    touched: BitVec,
    culled: BitVec,
}

fn occlusion_flags(drawings: &[Drawing], size: Size) -> Result<CullFlags, ToolGeometryError> {
    let mut touched = BitVec::repeat(false, drawings.len());
    let mut culled = BitVec::repeat(false, drawings.len());
    // Areas cleared by eraser strokes seen so far, which are all above the current stroke.
    let mut erased: Vec<Rect> = Vec::new();

    for (idx, drawing) in drawings.iter().enumerate().rev() {
        let Some(path) = drawing.create_path(size)? else {
            continue;
        };
        touched.set(idx, true);

        let is_eraser = drawing.tool.is_eraser();
        let rect = if is_eraser {
            drawing.tool.erased_rect(&path)
        } else {
            path.bounding_rect_for_culling(drawing.tool.line_width(size))
        };
        let hidden = erased.iter().any(|above| above.contains_rect(&rect));
        culled.set(idx, hidden);

        // A hidden eraser adds nothing that isn't erased already.
        if is_eraser && !hidden && !rect.is_empty() {
            erased.push(rect);
        }
    }
    Ok(CullFlags { touched, culled })
}

// Undo
impl Canvas {
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.drawings.is_empty()
    }
    /// Label for what [`Canvas::undo`] would do next.
    #[must_use]
    pub fn localized_next_undo_name(&self) -> String {
        match self.drawings.last() {
            Some(drawing) => drawing.tool.localized_undo_name(),
            None => Labels::get().nothing_to_undo().to_owned(),
        }
    }
    /// Remove the most recent stroke and re-run culling, since it may have been hiding others.
    ///
    /// Returns the undone stroke's label, or the "nothing to undo" label without changing anything
    /// if there are no strokes. Observers are told via [`Notifier::post_to_main`], so they hear of it
    /// only after this returns.
    /// # Errors
    /// If re-culling fails. The stroke stays removed, and no notification is posted.
    pub fn undo(&mut self) -> Result<String, ToolGeometryError> {
        let Some(last) = self.drawings.last() else {
            return Ok(Labels::get().nothing_to_undo().to_owned());
        };
        let id = last.id();
        let undo_name = last.tool.localized_undo_name();
        // By ID, so with duplicate IDs this is the first match rather than the last stroke.
        self.remove_drawing(id);

        self.perform_occlusion_culling()?;

        self.notifier.post_to_main(Event::CanvasUndo {
            canvas: self.index,
            undo_name: undo_name.clone(),
        });
        Ok(undo_name)
    }
}
// Serialization
impl Canvas {
    /// Like [`Serializable::construct`], also reporting every stroke or text that was dropped.
    /// # Errors
    /// If `index` is missing or not an integer, or the record is not a canvas.
    pub fn construct_with_diagnostics(
        record: &Record,
    ) -> Result<(Self, Vec<DecodeDiagnostic>), serialize::Error> {
        serialize::check_type::<Self>(record)?;
        let index = record.require_i64("index")?;
        let drawings = serialize::decode_list::<Drawing>("drawings", record.list_or_empty("drawings"));
        let text = serialize::decode_list::<Text>("text", record.list_or_empty("text"));

        let mut diagnostics = drawings.diagnostics;
        diagnostics.extend(text.diagnostics);

        let mut canvas = Self::new(index);
        canvas.drawings = drawings.items;
        // Through `add_text` so duplicate IDs in the record still leave the text unique.
        for text in text.items {
            canvas.add_text(text);
        }
        Ok((canvas, diagnostics))
    }
}
impl Serializable for Canvas {
    const TYPE: &'static str = "canvas";
    fn serialize(&self) -> Result<Record, serialize::Error> {
        let mut record = serialize::record_for::<Self>();
        record.insert("index".to_owned(), self.index.into());
        let drawings = self
            .drawings
            .iter()
            .map(|drawing| drawing.serialize().map(serde_json::Value::Object))
            .collect::<Result<Vec<_>, _>>()?;
        record.insert("drawings".to_owned(), drawings.into());
        let text = self
            .text
            .iter()
            .map(|text| text.serialize().map(serde_json::Value::Object))
            .collect::<Result<Vec<_>, _>>()?;
        record.insert("text".to_owned(), text.into());
        Ok(record)
    }
    fn construct(record: &Record) -> Result<Self, serialize::Error> {
        Self::construct_with_diagnostics(record).map(|(canvas, _)| canvas)
    }
}

/// Canvases are identified by index alone.
impl PartialEq for Canvas {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl Eq for Canvas {}
impl std::hash::Hash for Canvas {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        color::Color,
        geometry::Point,
        notify::CANVAS_DID_UNDO,
        tool::{Tool, ToolKind},
        util::FiniteF32,
    };
    use serde_json::json;
    use std::sync::Arc;

    /// A stroke of `kind` through normalized `points`, four reference pixels wide.
    fn stroke(kind: ToolKind, points: &[[f32; 2]]) -> Drawing {
        Drawing::new(
            Tool::new(kind, FiniteF32::new(4.0).unwrap(), Color::BLACK)
                .with_points(points.iter().map(|&[x, y]| Point::new(x, y))),
        )
    }
    /// Pen scribble spanning 400..500 on both axes at the culling size.
    fn small_pen() -> Drawing {
        stroke(ToolKind::Pen, &[[0.4, 0.4], [0.45, 0.5], [0.5, 0.45]])
    }
    /// Eraser spanning 300..600, enough to swallow `small_pen` with its line width.
    fn big_eraser() -> Drawing {
        stroke(ToolKind::Eraser, &[[0.3, 0.3], [0.6, 0.6]])
    }
    fn ids(drawings: &[Drawing]) -> Vec<DrawingID> {
        drawings.iter().map(Drawing::id).collect()
    }
    fn culled(canvas: &Canvas) -> Vec<bool> {
        canvas.all_drawings().iter().map(|d| d.is_culled).collect()
    }

    #[test]
    fn insertion_order() {
        let mut canvas = Canvas::new(0);
        let (a, b, c) = (small_pen(), big_eraser(), small_pen());
        let expected = vec![a.id(), b.id(), c.id()];
        canvas.add_drawing(a);
        canvas.add_drawing(b.clone());
        canvas.add_drawing(c);
        assert_eq!(ids(canvas.all_drawings()), expected);

        assert_eq!(canvas.remove_drawing(b.id()).map(|d| d.id()), Some(b.id()));
        assert_eq!(ids(canvas.all_drawings()), [expected[0], expected[2]]);
        assert!(canvas.remove_drawing(b.id()).is_none());
    }
    #[test]
    fn add_text_replaces() {
        let mut canvas = Canvas::new(0);
        let first = Text::new("first", Point::ZERO);
        let second = Text::new("second", Point::ZERO);
        canvas.add_text(first.clone());
        canvas.add_text(second.clone());

        let mut edited = first.clone();
        edited.value = "edited".to_owned();
        canvas.add_text(edited);

        let values: Vec<_> = canvas.all_text().iter().map(|t| t.value.as_str()).collect();
        // Replaced, and moved to the end.
        assert_eq!(values, ["second", "edited"]);
        assert_eq!(canvas.text(first.id()).map(|t| t.value.as_str()), Some("edited"));

        assert_eq!(canvas.remove_text(second.id()), Some(second.clone()));
        assert_eq!(canvas.remove_text(second.id()), None);
        assert_eq!(canvas.all_text().len(), 1);
    }
    #[test]
    fn duplicate_drawing_ids_remove_first() {
        // Tolerated, not guaranteed: this pins down the current first-match behavior.
        let mut canvas = Canvas::new(0);
        let original = small_pen();
        let duplicate = Drawing::with_id(original.id(), big_eraser().tool);
        canvas.add_drawing(original.clone());
        canvas.add_drawing(duplicate.clone());

        assert_eq!(canvas.drawing(original.id()), Some(&original));
        assert_eq!(canvas.remove_drawing(original.id()), Some(original));
        assert_eq!(canvas.all_drawings(), [duplicate]);
    }
    #[test]
    fn duplicate_drawing_ids_undo() {
        // Undo names the topmost stroke but removes the first with its ID.
        let mut canvas = Canvas::new(0);
        let original = small_pen();
        let duplicate = Drawing::with_id(original.id(), big_eraser().tool);
        canvas.add_drawing(original.clone());
        canvas.add_drawing(duplicate.clone());

        assert_eq!(canvas.undo(), Ok(duplicate.tool.localized_undo_name()));
        assert_eq!(canvas.all_drawings(), [duplicate.clone()]);
        assert_eq!(canvas.localized_next_undo_name(), duplicate.tool.localized_undo_name());

        assert_eq!(canvas.undo(), Ok(duplicate.tool.localized_undo_name()));
        assert!(!canvas.can_undo());
    }
    #[test]
    fn clones_do_not_share_observers() {
        let mut canvas = Canvas::new(1);
        let count = Arc::new(parking_lot::Mutex::new(0));
        let sink = count.clone();
        canvas
            .notifier()
            .subscribe(move |_: &Event| *sink.lock() += 1);
        canvas.add_drawing(small_pen());

        let mut copy = canvas.clone();
        assert_eq!(copy.all_drawings(), canvas.all_drawings());
        copy.clear();
        copy.add_drawing(small_pen());
        copy.undo().unwrap();
        assert_eq!(copy.notifier().pump_main(), 0);
        assert_eq!(*count.lock(), 0);
        assert_eq!(canvas.all_drawings().len(), 1);

        // Sharing is opt-in.
        copy.set_notifier(canvas.notifier().clone());
        copy.clear();
        assert_eq!(*count.lock(), 1);
    }
    #[test]
    fn later_eraser_culls() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(big_eraser());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [true, false]);
        assert_eq!(canvas.visible_drawings().count(), 1);
    }
    #[test]
    fn earlier_eraser_does_not_cull() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(big_eraser());
        canvas.add_drawing(small_pen());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [false, false]);
    }
    #[test]
    fn eraser_over_eraser() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(stroke(ToolKind::Eraser, &[[0.4, 0.4], [0.5, 0.5]]));
        canvas.add_drawing(big_eraser());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [true, false]);
    }
    #[test]
    fn overlap_is_not_containment() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(stroke(ToolKind::Eraser, &[[0.45, 0.3], [0.9, 0.9]]));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [false, false]);
    }
    #[test]
    fn line_width_counts() {
        // Eraser hugs the pen's points exactly, but not its width.
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(stroke(ToolKind::Eraser, &[[0.4, 0.4], [0.5, 0.5]]));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [false, false]);
    }
    #[test]
    fn only_erasers_occlude() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(stroke(ToolKind::Rectangle, &[[0.1, 0.1], [0.9, 0.9]]));
        canvas.add_drawing(stroke(ToolKind::Pen, &[[0.1, 0.1], [0.9, 0.9]]));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [false, false, false]);
    }
    #[test]
    fn erased_shapes_cull() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(stroke(ToolKind::Oval, &[[0.35, 0.35], [0.55, 0.55]]));
        canvas.add_drawing(stroke(ToolKind::Arrow, &[[0.35, 0.5], [0.55, 0.5]]));
        canvas.add_drawing(big_eraser());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [true, true, false]);
    }
    #[test]
    fn degenerate_eraser_hides_nothing() {
        // A horizontal swipe has no area of its own.
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(stroke(ToolKind::Eraser, &[[0.0, 0.45], [1.0, 0.45]]));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [false, false]);
    }
    #[test]
    fn eraser_points_off_canvas_are_pruned() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(stroke(
            ToolKind::Eraser,
            &[[0.3, 0.3], [5.0, 5.0], [0.6, 0.6]],
        ));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(canvas.all_drawings()[1].tool.points().len(), 2);
        assert_eq!(culled(&canvas), [true, false]);
    }
    #[test]
    fn unbuildable_strokes_keep_their_flag() {
        let mut canvas = Canvas::new(0);
        let mut lone_line = stroke(ToolKind::Line, &[[0.5, 0.5]]);
        lone_line.is_culled = true;
        canvas.add_drawing(lone_line);
        canvas.add_drawing(stroke(ToolKind::Pen, &[]));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [true, false]);
    }
    #[test]
    fn recull_uncovers() {
        let mut canvas = Canvas::new(0);
        let eraser = big_eraser();
        canvas.add_drawing(small_pen());
        canvas.add_drawing(eraser.clone());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [true, false]);

        canvas.remove_drawing(eraser.id());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [false]);
    }
    #[test]
    fn failed_culling_changes_nothing() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(stroke(ToolKind::Pen, &[[f32::NAN, 0.5]]));
        canvas.add_drawing(small_pen());
        canvas.add_drawing(big_eraser());
        canvas.add_text(Text::new("", Point::ZERO));

        assert_eq!(
            canvas.perform_occlusion_culling(),
            Err(ToolGeometryError::NonFinite {
                kind: ToolKind::Pen,
                index: 0
            })
        );
        // `small_pen` would have been culled, had the pass finished.
        assert_eq!(culled(&canvas), [false, false, false]);
        assert_eq!(canvas.all_text().len(), 1);
    }
    #[test]
    fn text_culling() {
        let mut canvas = Canvas::new(0);
        let keep = Text::new("  keep me ", Point::new(0.1, 0.1));
        canvas.add_text(Text::new("", Point::ZERO));
        canvas.add_text(keep.clone());
        canvas.add_text(Text::new("", Point::ZERO));
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(canvas.all_text(), [keep]);
    }
    #[test]
    fn emptied_text_is_culled() {
        let mut canvas = Canvas::new(0);
        let text = Text::new("typo", Point::ZERO);
        canvas.add_text(text.clone());
        if let Some(editing) = canvas.text_mut(text.id()) {
            editing.value.clear();
        }
        canvas.perform_text_culling();
        assert!(canvas.all_text().is_empty());
    }
    #[test]
    fn undo_last() {
        let mut canvas = Canvas::new(0);
        let a = small_pen();
        let b = stroke(ToolKind::Highlighter, &[[0.1, 0.1], [0.2, 0.2]]);
        canvas.add_drawing(a.clone());
        canvas.add_drawing(b.clone());
        assert_eq!(canvas.localized_next_undo_name(), b.tool.localized_undo_name());

        assert_eq!(canvas.undo(), Ok(b.tool.localized_undo_name()));
        assert_eq!(ids(canvas.all_drawings()), [a.id()]);
        assert!(canvas.can_undo());

        assert_eq!(canvas.undo(), Ok(a.tool.localized_undo_name()));
        assert!(canvas.all_drawings().is_empty());
        assert!(!canvas.can_undo());
    }
    #[test]
    fn undo_nothing() {
        let mut canvas = Canvas::new(0);
        canvas.add_text(Text::new("untouched", Point::ZERO));
        let nothing = Labels::get().nothing_to_undo().to_owned();
        assert_eq!(canvas.localized_next_undo_name(), nothing);
        assert_eq!(canvas.undo(), Ok(nothing));
        assert_eq!(canvas.all_text().len(), 1);
        assert_eq!(canvas.notifier().pending(), 0);
    }
    #[test]
    fn undo_uncovers() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(big_eraser());
        canvas.perform_occlusion_culling().unwrap();
        assert_eq!(culled(&canvas), [true, false]);

        canvas.undo().unwrap();
        assert_eq!(culled(&canvas), [false]);
    }
    #[test]
    fn undo_notifies_later() {
        let mut canvas = Canvas::new(7);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        canvas
            .notifier()
            .subscribe(move |event: &Event| sink.lock().push(event.clone()));
        canvas.add_drawing(big_eraser());

        let name = canvas.undo().unwrap();
        assert!(seen.lock().is_empty(), "delivered before pumping");

        assert_eq!(canvas.notifier().pump_main(), 1);
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name(), CANVAS_DID_UNDO);
        assert_eq!(seen[0].source(), 7);
        assert_eq!(seen[0].info(), Some(name.as_str()));
    }
    #[test]
    fn unobserved_undo_leaves_no_backlog() {
        let mut canvas = Canvas::new(0);
        for _ in 0..1000 {
            canvas.add_drawing(small_pen());
        }
        while canvas.can_undo() {
            canvas.undo().unwrap();
        }
        assert_eq!(canvas.notifier().pending(), 0);
    }
    #[test]
    fn clear_notifies_now() {
        let mut canvas = Canvas::new(2);
        let count = Arc::new(parking_lot::Mutex::new(0));
        let sink = count.clone();
        canvas.notifier().subscribe(move |event: &Event| {
            assert_eq!(event, &Event::CanvasCleared { canvas: 2 });
            *sink.lock() += 1;
        });
        for _ in 0..50 {
            canvas.add_drawing(small_pen());
            canvas.add_text(Text::new("x", Point::ZERO));
        }
        canvas.clear();
        assert!(canvas.all_drawings().is_empty());
        assert!(canvas.all_text().is_empty());
        assert_eq!(*count.lock(), 1);

        // Idempotent.
        canvas.clear();
        assert!(canvas.all_drawings().is_empty());
        assert_eq!(*count.lock(), 2);
    }
    #[test]
    fn equality_by_index() {
        let mut a = Canvas::new(4);
        a.add_drawing(small_pen());
        assert_eq!(a, Canvas::new(4));
        assert_ne!(a, Canvas::new(5));
    }
    #[test]
    fn record_round_trip() {
        let mut canvas = Canvas::new(12);
        canvas.add_drawing(small_pen());
        canvas.add_drawing(big_eraser());
        canvas.add_drawing(stroke(ToolKind::Oval, &[[0.1, 0.2], [0.3, 0.4]]));
        canvas.add_text(Text::new("note", Point::new(0.5, 0.25)));
        canvas.add_text(Text::new("", Point::ZERO));

        let record = canvas.serialize().unwrap();
        assert_eq!(record.get("_type"), Some(&json!("canvas")));
        assert_eq!(record.get("index"), Some(&json!(12)));

        let (back, diagnostics) = Canvas::construct_with_diagnostics(&record).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(back.index(), 12);
        assert_eq!(back.all_drawings(), canvas.all_drawings());
        assert_eq!(back.all_text(), canvas.all_text());
    }
    #[test]
    fn lenient_decode() {
        let good = small_pen();
        let record = json!({
            "_type": "canvas",
            "index": 3,
            "drawings": [
                serde_json::Value::Object(good.serialize().unwrap()),
                {"_type": "drawing", "id": "garbage"},
            ],
            "text": [{"_type": "text", "value": 4}],
        });
        let (canvas, diagnostics) =
            Canvas::construct_with_diagnostics(record.as_object().unwrap()).unwrap();
        assert_eq!(canvas.all_drawings(), [good]);
        assert!(canvas.all_text().is_empty());
        let dropped: Vec<_> = diagnostics.iter().map(|d| (d.list, d.position)).collect();
        assert_eq!(dropped, [("drawings", 1), ("text", 0)]);
    }
    #[test]
    fn missing_lists_are_empty() {
        let record = json!({"index": 1});
        let canvas = Canvas::construct(record.as_object().unwrap()).unwrap();
        assert!(canvas.all_drawings().is_empty());
        assert!(canvas.all_text().is_empty());
    }
    #[test]
    fn index_is_required() {
        for record in [json!({"drawings": []}), json!({"index": "1"}), json!({"index": 1.5})] {
            assert_eq!(
                Canvas::construct(record.as_object().unwrap()),
                Err(serialize::Error::MissingField("index".to_owned()))
            );
        }
    }
    #[test]
    fn serialize_propagates_child_failure() {
        let mut canvas = Canvas::new(0);
        canvas.add_drawing(stroke(ToolKind::Pen, &[[f32::INFINITY, 0.0]]));
        assert_eq!(
            canvas.serialize().err(),
            Some(serialize::Error::NonFiniteNumber("points".to_owned()))
        );
    }
}
