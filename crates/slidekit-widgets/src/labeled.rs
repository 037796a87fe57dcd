#![forbid(unsafe_code)]

//! Sliders paired with editable numeric labels.
//!
//! A composite owns its slider and keeps its labels in sync purely through
//! the slider's signals; label edits go back through the slider's public
//! setters. Labels live behind `Rc<RefCell<..>>` so the signal slots can
//! reach them.
//!
//! A slot never borrows a label that is already borrowed: edits are parsed
//! and the borrow dropped before the slider is touched.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use slidekit_core::signal::{Signal, Subscription};

use crate::error::{Result, SliderError};
use crate::float::FloatSlider;
use crate::range::RangeSlider;
use crate::scalar::Slider;
use crate::value::SliderValue;

/// Decimals beyond which label values are no longer rounded.
const MAX_ROUNDED_DECIMALS: i32 = 15;

/// Editable numeric label model.
///
/// Holds a value clamped into its own range, rendered with a fixed number of
/// decimals, plus a text buffer the user edits. [`SpinLabel::commit_text`]
/// parses the buffer back into a value.
#[derive(Debug)]
pub struct SpinLabel {
    value: f64,
    minimum: f64,
    maximum: f64,
    decimals: i32,
    text: String,
    editing: bool,
    /// Emitted by [`SpinLabel::finish_editing`] with the accepted value.
    pub editing_finished: Signal<f64>,
}

impl Default for SpinLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinLabel {
    /// Range `[0, 99]`, value 0, no decimals.
    #[must_use]
    pub fn new() -> Self {
        let mut label = Self {
            value: 0.0,
            minimum: 0.0,
            maximum: 99.0,
            decimals: 0,
            text: String::new(),
            editing: false,
            editing_finished: Signal::new("editing_finished"),
        };
        label.text = label.format(label.value);
        label
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: i32) -> Self {
        self.set_decimals(decimals);
        self
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    #[must_use]
    pub fn decimals(&self) -> i32 {
        self.decimals
    }

    /// The text shown, including uncommitted edits.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the buffer holds an uncommitted edit.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Render `value` with this label's decimals.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let precision = self.decimals.max(0) as usize;
        format!("{value:.precision$}")
    }

    fn round(&self, value: f64) -> f64 {
        if self.decimals < 0 || self.decimals > MAX_ROUNDED_DECIMALS {
            return value;
        }
        let factor = 10f64.powi(self.decimals);
        let rounded = (value * factor).round() / factor;
        if rounded.is_finite() { rounded } else { value }
    }

    /// Set the value (clamped and rounded). Discards any pending edit.
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.value = self.round(value).clamp(self.minimum, self.maximum);
        self.text = self.format(self.value);
        self.editing = false;
    }

    /// Set the accepted range. An inverted pair collapses onto `minimum`.
    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        if minimum.is_nan() || maximum.is_nan() {
            return;
        }
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        if !self.editing {
            self.set_value(self.value);
        } else {
            self.value = self.value.clamp(self.minimum, self.maximum);
        }
    }

    /// Set the displayed decimals. Negative values show whole numbers.
    pub fn set_decimals(&mut self, decimals: i32) {
        self.decimals = decimals;
        if !self.editing {
            self.set_value(self.value);
        }
    }

    /// Replace the text buffer, as typed by the user.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.editing = true;
    }

    /// Parse the buffer.
    ///
    /// A finite number is clamped, stored and returned. Anything else
    /// restores the text of the current value and returns `None`.
    pub fn commit_text(&mut self) -> Option<f64> {
        let parsed = self
            .text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite());
        match parsed {
            Some(v) => {
                self.set_value(v);
                Some(self.value)
            }
            None => {
                self.set_value(self.value);
                None
            }
        }
    }

    /// [`commit_text`](Self::commit_text), then emit `editing_finished` on
    /// success.
    pub fn finish_editing(&mut self) -> Option<f64> {
        let committed = self.commit_text();
        if let Some(v) = committed {
            self.editing_finished.emit(&v);
        }
        committed
    }
}

fn label_decimals<T: SliderValue>() -> i32 {
    if T::INTEGRAL { 0 } else { 2 }
}

/// Commit a shared label's buffer, releasing the borrow before returning.
fn commit_shared(label: &RefCell<SpinLabel>) -> Option<f64> {
    label.borrow_mut().commit_text()
}

fn announce(label: &RefCell<SpinLabel>, value: f64) {
    let label = label.borrow();
    label.editing_finished.emit(&value);
}

// ---------------------------------------------------------------------------
// Single-handle composites
// ---------------------------------------------------------------------------

/// A [`Slider`] with one value label.
#[derive(Debug)]
pub struct LabeledSlider<T: SliderValue> {
    slider: Slider<T>,
    label: Rc<RefCell<SpinLabel>>,
    _subscriptions: [Subscription; 2],
}

impl<T: SliderValue> Default for LabeledSlider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SliderValue> LabeledSlider<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_slider(Slider::new())
    }

    /// Wrap an existing slider; the label starts from its current state.
    #[must_use]
    pub fn from_slider(slider: Slider<T>) -> Self {
        let mut label = SpinLabel::new().with_decimals(label_decimals::<T>());
        label.set_range(slider.minimum().to_f64(), slider.maximum().to_f64());
        label.set_value(slider.value().to_f64());
        let label = Rc::new(RefCell::new(label));

        let on_value = {
            let label = Rc::clone(&label);
            slider
                .signals()
                .value_changed
                .connect(move |v: &T| label.borrow_mut().set_value(v.to_f64()))
        };
        let on_range = {
            let label = Rc::clone(&label);
            slider
                .signals()
                .range_changed
                .connect(move |(lo, hi): &(T, T)| {
                    label.borrow_mut().set_range(lo.to_f64(), hi.to_f64());
                })
        };

        Self {
            slider,
            label,
            _subscriptions: [on_value, on_range],
        }
    }

    #[must_use]
    pub fn slider(&self) -> &Slider<T> {
        &self.slider
    }

    /// Mutable access to the slider. The label follows through signals.
    pub fn slider_mut(&mut self) -> &mut Slider<T> {
        &mut self.slider
    }

    #[must_use]
    pub fn label(&self) -> Ref<'_, SpinLabel> {
        self.label.borrow()
    }

    pub fn set_value(&mut self, value: T) {
        self.slider.set_value(value);
    }

    pub fn set_range(&mut self, minimum: T, maximum: T) {
        self.slider.set_range(minimum, maximum);
    }

    /// Type into the label.
    pub fn edit_label(&mut self, text: impl Into<String>) {
        self.label.borrow_mut().set_text(text);
    }

    /// Commit the label edit into the slider. Returns the slider's value
    /// after the edit, or `None` if the text did not parse.
    pub fn commit_label(&mut self) -> Option<T> {
        let parsed = commit_shared(&self.label)?;
        self.slider.set_value(T::from_f64(parsed));
        let value = self.slider.value();
        // A clamped edit may not change the slider at all.
        self.label.borrow_mut().set_value(value.to_f64());
        announce(&self.label, value.to_f64());
        Some(value)
    }
}

/// A [`FloatSlider`] with one value label showing the slider's decimals.
#[derive(Debug)]
pub struct LabeledFloatSlider {
    slider: FloatSlider,
    label: Rc<RefCell<SpinLabel>>,
    _subscriptions: [Subscription; 2],
}

impl Default for LabeledFloatSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl LabeledFloatSlider {
    #[must_use]
    pub fn new() -> Self {
        Self::from_slider(FloatSlider::new())
    }

    #[must_use]
    pub fn from_slider(slider: FloatSlider) -> Self {
        let mut label = SpinLabel::new().with_decimals(slider.decimals());
        label.set_range(slider.minimum(), slider.maximum());
        label.set_value(slider.value());
        let label = Rc::new(RefCell::new(label));

        let on_value = {
            let label = Rc::clone(&label);
            slider
                .signals()
                .value_changed
                .connect(move |v: &f64| label.borrow_mut().set_value(*v))
        };
        let on_range = {
            let label = Rc::clone(&label);
            slider
                .signals()
                .range_changed
                .connect(move |&(lo, hi): &(f64, f64)| label.borrow_mut().set_range(lo, hi))
        };

        Self {
            slider,
            label,
            _subscriptions: [on_value, on_range],
        }
    }

    #[must_use]
    pub fn slider(&self) -> &FloatSlider {
        &self.slider
    }

    /// Run `f` against the slider, then bring the label's decimals and
    /// range back in line with it.
    ///
    /// Values and ranges already reach the label through signals; the
    /// decimals do not, so direct mutable access goes through here.
    pub fn update_slider<R>(&mut self, f: impl FnOnce(&mut FloatSlider) -> R) -> R {
        let out = f(&mut self.slider);
        self.sync_label();
        out
    }

    fn sync_label(&self) {
        let mut label = self.label.borrow_mut();
        label.set_decimals(self.slider.decimals());
        label.set_range(self.slider.minimum(), self.slider.maximum());
        label.set_value(self.slider.value());
    }

    #[must_use]
    pub fn label(&self) -> Ref<'_, SpinLabel> {
        self.label.borrow()
    }

    pub fn set_value(&mut self, value: f64) {
        self.slider.set_value(value);
    }

    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        self.slider.set_range(minimum, maximum);
    }

    /// Change the slider's decimals and the label's with it.
    pub fn set_decimals(&mut self, decimals: i32) -> Result<()> {
        self.slider.set_decimals(decimals)?;
        self.sync_label();
        Ok(())
    }

    pub fn edit_label(&mut self, text: impl Into<String>) {
        self.label.borrow_mut().set_text(text);
    }

    pub fn commit_label(&mut self) -> Option<f64> {
        let parsed = commit_shared(&self.label)?;
        self.slider.set_value(parsed);
        let value = self.slider.value();
        self.label.borrow_mut().set_value(value);
        announce(&self.label, value);
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// Range composite
// ---------------------------------------------------------------------------

/// Where per-handle labels sit relative to the groove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelPosition {
    /// No per-handle labels are shown.
    Hidden,
    #[default]
    Above,
    Below,
    Left,
    Right,
    /// Centered on the handle itself.
    OnHandle,
}

/// Shared state the range composite's slots update.
#[derive(Debug)]
struct RangeLabels {
    min: SpinLabel,
    max: SpinLabel,
    handles: Vec<SpinLabel>,
    decimals: i32,
}

impl RangeLabels {
    fn new_handle_label(&self, minimum: f64, maximum: f64) -> SpinLabel {
        let mut label = SpinLabel::new().with_decimals(self.decimals);
        label.set_range(minimum, maximum);
        label
    }

    /// Resynchronize every label from slider state.
    fn sync(&mut self, values: &[f64], minimum: f64, maximum: f64, edges_show_range: bool) {
        if self.handles.len() != values.len() {
            let fresh: Vec<SpinLabel> = (0..values.len())
                .map(|_| self.new_handle_label(minimum, maximum))
                .collect();
            self.handles = fresh;
        }
        for (label, &v) in self.handles.iter_mut().zip(values) {
            label.set_range(minimum, maximum);
            label.set_value(v);
        }
        self.sync_edges(values, minimum, maximum, edges_show_range);
    }

    fn sync_edges(&mut self, values: &[f64], minimum: f64, maximum: f64, edges_show_range: bool) {
        if edges_show_range {
            self.min.set_range(f64::MIN, f64::MAX);
            self.max.set_range(f64::MIN, f64::MAX);
            self.min.set_value(minimum);
            self.max.set_value(maximum);
        } else {
            self.min.set_range(minimum, maximum);
            self.max.set_range(minimum, maximum);
            if let (Some(&first), Some(&last)) = (values.first(), values.last()) {
                self.min.set_value(first);
                self.max.set_value(last);
            }
        }
    }
}

/// A [`RangeSlider`] with edge labels and one label per handle.
///
/// Edge labels show the range by default; with `edges_show_range` off they
/// show (and edit) the first and last handle instead.
#[derive(Debug)]
pub struct LabeledRangeSlider<T: SliderValue> {
    slider: RangeSlider<T>,
    labels: Rc<RefCell<RangeLabels>>,
    edges_show_range: Rc<Cell<bool>>,
    label_position: LabelPosition,
    _subscriptions: [Subscription; 2],
}

impl<T: SliderValue> Default for LabeledRangeSlider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SliderValue> LabeledRangeSlider<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_slider(RangeSlider::new())
    }

    #[must_use]
    pub fn from_slider(slider: RangeSlider<T>) -> Self {
        let decimals = label_decimals::<T>();
        let labels = Rc::new(RefCell::new(RangeLabels {
            min: SpinLabel::new().with_decimals(decimals),
            max: SpinLabel::new().with_decimals(decimals),
            handles: Vec::new(),
            decimals,
        }));
        let edges_show_range = Rc::new(Cell::new(true));

        labels.borrow_mut().sync(
            &to_f64s(slider.value()),
            slider.minimum().to_f64(),
            slider.maximum().to_f64(),
            true,
        );

        // Slots read the slider's state from their payloads only, so the
        // bounds are tracked alongside the labels.
        let bounds = Rc::new(Cell::new((slider.minimum().to_f64(), slider.maximum().to_f64())));
        let last_values = Rc::new(RefCell::new(to_f64s(slider.value())));

        let on_value = {
            let labels = Rc::clone(&labels);
            let edges = Rc::clone(&edges_show_range);
            let bounds = Rc::clone(&bounds);
            let last_values = Rc::clone(&last_values);
            slider
                .signals()
                .value_changed
                .connect(move |values: &Vec<T>| {
                    let values = to_f64s(values);
                    let (lo, hi) = bounds.get();
                    labels.borrow_mut().sync(&values, lo, hi, edges.get());
                    *last_values.borrow_mut() = values;
                })
        };
        let on_range = {
            let labels = Rc::clone(&labels);
            let edges = Rc::clone(&edges_show_range);
            slider
                .signals()
                .range_changed
                .connect(move |(lo, hi): &(T, T)| {
                    let (lo, hi) = (lo.to_f64(), hi.to_f64());
                    bounds.set((lo, hi));
                    let values = last_values.borrow();
                    labels.borrow_mut().sync(&values, lo, hi, edges.get());
                })
        };

        Self {
            slider,
            labels,
            edges_show_range,
            label_position: LabelPosition::default(),
            _subscriptions: [on_value, on_range],
        }
    }

    #[must_use]
    pub fn slider(&self) -> &RangeSlider<T> {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut RangeSlider<T> {
        &mut self.slider
    }

    fn resync(&self) {
        self.labels.borrow_mut().sync(
            &to_f64s(self.slider.value()),
            self.slider.minimum().to_f64(),
            self.slider.maximum().to_f64(),
            self.edges_show_range.get(),
        );
    }

    #[must_use]
    pub fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    pub fn set_label_position(&mut self, position: LabelPosition) {
        self.label_position = position;
    }

    #[must_use]
    pub fn edges_show_range(&self) -> bool {
        self.edges_show_range.get()
    }

    pub fn set_edges_show_range(&mut self, show_range: bool) {
        self.edges_show_range.set(show_range);
        self.resync();
    }

    /// Decimals shown by every label.
    pub fn set_label_decimals(&mut self, decimals: i32) {
        {
            let mut labels = self.labels.borrow_mut();
            labels.decimals = decimals;
            labels.min.set_decimals(decimals);
            labels.max.set_decimals(decimals);
            for label in &mut labels.handles {
                label.set_decimals(decimals);
            }
        }
        self.resync();
    }

    #[must_use]
    pub fn handle_label_count(&self) -> usize {
        self.labels.borrow().handles.len()
    }

    /// Texts of the per-handle labels, in handle order.
    #[must_use]
    pub fn handle_label_texts(&self) -> Vec<String> {
        self.labels
            .borrow()
            .handles
            .iter()
            .map(|l| l.text().to_owned())
            .collect()
    }

    #[must_use]
    pub fn min_label_text(&self) -> String {
        self.labels.borrow().min.text().to_owned()
    }

    #[must_use]
    pub fn max_label_text(&self) -> String {
        self.labels.borrow().max.text().to_owned()
    }

    /// Type into a handle label.
    pub fn edit_handle_label(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let mut labels = self.labels.borrow_mut();
        let count = labels.handles.len();
        let label = labels
            .handles
            .get_mut(index)
            .ok_or(SliderError::HandleIndexOutOfRange { index, count })?;
        label.set_text(text);
        Ok(())
    }

    pub fn edit_min_label(&mut self, text: impl Into<String>) {
        self.labels.borrow_mut().min.set_text(text);
    }

    pub fn edit_max_label(&mut self, text: impl Into<String>) {
        self.labels.borrow_mut().max.set_text(text);
    }

    /// Commit a handle label edit into that handle.
    ///
    /// `Ok(None)` means the text did not parse and was reverted.
    pub fn commit_handle_label(&mut self, index: usize) -> Result<Option<T>> {
        let parsed = {
            let mut labels = self.labels.borrow_mut();
            let count = labels.handles.len();
            labels
                .handles
                .get_mut(index)
                .ok_or(SliderError::HandleIndexOutOfRange { index, count })?
                .commit_text()
        };
        let Some(parsed) = parsed else {
            return Ok(None);
        };
        self.slider.set_value_at(index, T::from_f64(parsed))?;
        self.resync();
        let value = self.slider.value()[index];
        self.announce_handle(index, value.to_f64());
        Ok(Some(value))
    }

    /// Commit the minimum edge label: the range minimum, or the first handle.
    pub fn commit_min_label(&mut self) -> Option<T> {
        let parsed = self.labels.borrow_mut().min.commit_text()?;
        let value = T::from_f64(parsed);
        let applied = if self.edges_show_range.get() {
            self.slider.set_minimum(value);
            self.slider.minimum()
        } else {
            // The first handle always exists.
            let _ = self.slider.set_value_at(0, value);
            self.slider.value()[0]
        };
        self.resync();
        self.labels
            .borrow()
            .min
            .editing_finished
            .emit(&applied.to_f64());
        Some(applied)
    }

    /// Commit the maximum edge label: the range maximum, or the last handle.
    pub fn commit_max_label(&mut self) -> Option<T> {
        let parsed = self.labels.borrow_mut().max.commit_text()?;
        let value = T::from_f64(parsed);
        let applied = if self.edges_show_range.get() {
            self.slider.set_maximum(value);
            self.slider.maximum()
        } else {
            let last = self.slider.handle_count() - 1;
            let _ = self.slider.set_value_at(last, value);
            self.slider.value()[last]
        };
        self.resync();
        self.labels
            .borrow()
            .max
            .editing_finished
            .emit(&applied.to_f64());
        Some(applied)
    }

    fn announce_handle(&self, index: usize, value: f64) {
        let labels = self.labels.borrow();
        if let Some(label) = labels.handles.get(index) {
            label.editing_finished.emit(&value);
        }
    }
}

fn to_f64s<T: SliderValue>(values: &[T]) -> Vec<f64> {
    values.iter().map(|v| v.to_f64()).collect()
}
