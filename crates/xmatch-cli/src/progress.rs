//! Terminal progress bars for matching passes.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;
use xmatch_map::ProgressSink;
use xmatch_model::MatchStatistics;

const BAR_TEMPLATE: &str = "{msg:>28} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}";

/// One bar per method, drawn on stderr.
pub struct TerminalProgress {
    visible: bool,
    current: Option<(String, ProgressBar)>,
}

impl TerminalProgress {
    /// Bars are hidden when stderr is not a terminal or logs are verbose.
    pub fn new(quiet: bool) -> Self {
        Self {
            visible: !quiet && io::stderr().is_terminal(),
            current: None,
        }
    }

    fn bar_for(&mut self, method: &str, total: usize) -> &ProgressBar {
        if self
            .current
            .as_ref()
            .is_some_and(|(name, _)| name != method)
            && let Some((_, bar)) = self.current.take()
        {
            bar.finish_and_clear();
        }
        let visible = self.visible;
        let (_, bar) = self
            .current
            .get_or_insert_with(|| (method.to_string(), new_bar(method, total, visible)));
        bar
    }
}

fn new_bar(method: &str, total: usize, visible: bool) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if visible {
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
    } else {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    bar.set_message(method.to_string());
    bar
}

impl ProgressSink for TerminalProgress {
    fn rows_processed(&mut self, method: &str, done: usize, total: usize) {
        self.bar_for(method, total).set_position(done as u64);
    }

    fn method_finished(&mut self, method: &str, statistics: &MatchStatistics) {
        if let Some((name, bar)) = self.current.take() {
            if name == method {
                bar.finish_with_message(format!(
                    "{method}: {:.1}%",
                    statistics.mean_score
                ));
            } else {
                bar.finish_and_clear();
            }
        }
        debug!(method, total = statistics.total, "method finished");
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        if let Some((_, bar)) = self.current.take() {
            bar.finish_and_clear();
        }
    }
}
