//! Chart Display Slot
//!
//! The drawing library is an external collaborator behind `ChartRenderer`.
//! A `ChartSlot` owns at most one drawn chart and always releases it before
//! drawing the next one, when cleared, and when dropped.

use askdata_charts::{synthesize, ChartSpec};
use askdata_core::ChartDescription;

/// What the renderer is asked to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// A synthesized frontend specification
    Spec(ChartSpec),
    /// A pre-rendered image supplied by the service
    BackendImage {
        image_data: String,
        alt_text: Option<String>,
        title: Option<String>,
    },
}

impl Drawable {
    /// Prepare a chart for drawing.
    ///
    /// Returns `None` when there is nothing to draw: a frontend chart with no
    /// labels, or a backend chart without image data.
    pub fn from_chart(chart: &ChartDescription) -> Option<Self> {
        if chart.is_frontend() {
            if chart.labels().is_empty() {
                tracing::debug!("[ChartSlot] Chart has no labels, nothing to draw");
                return None;
            }
            return synthesize(chart).map(Drawable::Spec);
        }

        let config = &chart.chart_config;
        let image_data = config.image_data.clone().filter(|d| !d.is_empty())?;
        Some(Drawable::BackendImage {
            image_data,
            alt_text: config.alt_text.clone(),
            title: config.title.clone(),
        })
    }
}

/// A chart the renderer has drawn and still holds resources for.
pub trait RenderedChart: Send {
    /// Free the drawing resources. Called exactly once per chart.
    fn release(&mut self);
}

/// The drawing library.
pub trait ChartRenderer: Send + Sync {
    fn draw(&self, drawable: &Drawable) -> Box<dyn RenderedChart>;
}

/// Owner of the chart currently shown in one place of the UI.
pub struct ChartSlot<R: ChartRenderer> {
    renderer: R,
    current: Option<Box<dyn RenderedChart>>,
}

impl<R: ChartRenderer> ChartSlot<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            current: None,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    /// Show `chart`, releasing whatever the slot held first.
    ///
    /// Returns whether something was drawn.
    pub fn show(&mut self, chart: &ChartDescription) -> bool {
        self.clear();
        match Drawable::from_chart(chart) {
            Some(drawable) => {
                self.current = Some(self.renderer.draw(&drawable));
                true
            }
            None => false,
        }
    }

    /// Release the current chart, if any.
    pub fn clear(&mut self) {
        if let Some(mut chart) = self.current.take() {
            chart.release();
        }
    }
}

impl<R: ChartRenderer> Drop for ChartSlot<R> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use askdata_core::{ChartType, Dataset};

    #[derive(Default, Clone)]
    struct Log(Arc<Mutex<Vec<String>>>);

    impl Log {
        fn push(&self, entry: String) {
            self.0.lock().unwrap().push(entry);
        }
        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeChart {
        name: String,
        log: Log,
    }

    impl RenderedChart for FakeChart {
        fn release(&mut self) {
            self.log.push(format!("release {}", self.name));
        }
    }

    struct FakeRenderer {
        log: Log,
    }

    impl ChartRenderer for FakeRenderer {
        fn draw(&self, drawable: &Drawable) -> Box<dyn RenderedChart> {
            let name = match drawable {
                Drawable::Spec(spec) => format!("{:?}", spec.renderer).to_lowercase(),
                Drawable::BackendImage { .. } => "image".to_string(),
            };
            self.log.push(format!("draw {}", name));
            Box::new(FakeChart {
                name,
                log: self.log.clone(),
            })
        }
    }

    fn bar_chart() -> ChartDescription {
        ChartDescription::frontend(
            ChartType::Bar,
            vec!["a".into(), "b".into()],
            vec![Dataset::new("x", vec![1.0, 2.0])],
        )
    }

    #[test]
    fn test_show_releases_previous_chart_first() {
        let log = Log::default();
        let mut slot = ChartSlot::new(FakeRenderer { log: log.clone() });

        assert!(slot.show(&bar_chart()));
        assert!(slot.show(&ChartDescription::backend("data:image/png;base64,AAAA")));
        drop(slot);

        assert_eq!(
            log.entries(),
            vec!["draw bar", "release bar", "draw image", "release image"]
        );
    }

    #[test]
    fn test_empty_labels_not_drawn() {
        let log = Log::default();
        let mut slot = ChartSlot::new(FakeRenderer { log: log.clone() });
        slot.show(&bar_chart());

        let empty = ChartDescription::frontend(ChartType::Line, vec![], vec![]);
        assert!(!slot.show(&empty));
        assert!(!slot.is_occupied());
        assert_eq!(log.entries(), vec!["draw bar", "release bar"]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let log = Log::default();
        let mut slot = ChartSlot::new(FakeRenderer { log: log.clone() });
        slot.show(&bar_chart());
        slot.clear();
        slot.clear();
        drop(slot);
        assert_eq!(log.entries(), vec!["draw bar", "release bar"]);
    }
}
