//! Selection decoration: feedback effect first, then the model's own handler
use crate::types::ViewModel;
use std::rc::Rc;

pub type SelectionHandler = Rc<dyn Fn()>;

/// Visual feedback run before every decorated selection.
pub type SelectionFeedback = Rc<dyn Fn()>;

pub fn decorate_handler(handler: &SelectionHandler, feedback: &SelectionFeedback) -> SelectionHandler {
    let handler = Rc::clone(handler);
    let feedback = Rc::clone(feedback);
    Rc::new(move || {
        feedback();
        handler();
    })
}

/// One wrap per selectable model; order and non-selectable models are untouched.
pub fn decorate(models: &[ViewModel], feedback: &SelectionFeedback) -> Vec<ViewModel> {
    models
        .iter()
        .map(|model| {
            let mut model = model.clone();
            if let Some(handler) = model.selection_handler().cloned() {
                model.replace_selection_handler(decorate_handler(&handler, feedback));
            }
            model
        })
        .collect()
}
