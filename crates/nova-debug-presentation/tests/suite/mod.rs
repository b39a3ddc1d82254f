// Integration suite for `nova-debug-presentation`, built as the single `tests`
// binary (`cargo test -p nova-debug-presentation --test tests`).
mod breakpoint_labels;
mod config_loading;
mod detail_evaluation;
mod element_labels;
mod icons;
mod thread_labels;
