//! View options controller.
//!
//! Sits between a rendering surface and the [`ViewStateStore`]. It computes
//! the presentable option set from [`crate::rules`] and turns raw interaction
//! events into store mutations. It holds no state of its own.

pub mod model;

use std::str::FromStr;

use crate::capabilities::CapabilityFlags;
use crate::error::{Result, VistaError};
use crate::filter::{FilterKey, FilterKind, FilterValue, canonical_dates};
use crate::properties::PropertyName;
use crate::rules::{allowed_group_by, allowed_order_by, allowed_properties, shows_layout_controls};
use crate::store::ViewStateStore;
use crate::types::{GroupBy, IssueTypeFilter, OrderBy, ViewType};
use crate::utils::same_elements;

pub use model::{Menu, MenuOption, PropertyChip, ViewOptionsModel};

/// An interaction emitted by the rendering surface.
///
/// Keys arrive as the raw strings the surface rendered, so anything outside
/// the enumerated domains is rejected with `InvalidKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ViewSelected(String),
    GroupBySelected(String),
    OrderBySelected(String),
    IssueTypeSelected(String),
    EmptyGroupsToggled(bool),
    PropertyClicked(String),
    FilterSelected { key: String, value: FilterValue },
    FiltersCleared,
}

pub struct ViewOptionsController<'a> {
    store: &'a mut ViewStateStore,
    capabilities: &'a dyn CapabilityFlags,
}

impl<'a> ViewOptionsController<'a> {
    pub fn new(store: &'a mut ViewStateStore, capabilities: &'a dyn CapabilityFlags) -> Self {
        ViewOptionsController {
            store,
            capabilities,
        }
    }

    fn estimates_active(&self) -> bool {
        self.store
            .scope()
            .is_some_and(|scope| self.capabilities.is_estimate_active(scope))
    }

    /// Compute the option set for the current view.
    pub fn render(&self) -> ViewOptionsModel {
        let state = self.store.state();
        let view = state.view;

        let views = ViewType::ALL
            .into_iter()
            .map(|v| MenuOption {
                key: v.to_string(),
                label: v.label().to_string(),
                selected: v == view,
            })
            .collect();

        let (group_by, order_by, show_empty_groups) = if shows_layout_controls(view) {
            let group_menu = Menu {
                label: state.group_by.label().to_string(),
                options: allowed_group_by(view)
                    .into_iter()
                    .map(|key| MenuOption {
                        key: key.to_string(),
                        label: key.label().to_string(),
                        selected: key == state.group_by,
                    })
                    .collect(),
            };
            let order_menu = Menu {
                label: state.order_by.label().to_string(),
                options: allowed_order_by(view, state.group_by)
                    .into_iter()
                    .map(|key| MenuOption {
                        key: key.to_string(),
                        label: key.label().to_string(),
                        selected: key == state.order_by,
                    })
                    .collect(),
            };
            (Some(group_menu), Some(order_menu), Some(state.show_empty_groups))
        } else {
            (None, None, None)
        };

        let current_type = state.filters.issue_type();
        let issue_type = Menu {
            label: current_type
                .map(|t| t.label())
                .unwrap_or("Select")
                .to_string(),
            options: IssueTypeFilter::ALL
                .into_iter()
                .map(|t| MenuOption {
                    key: t.to_string(),
                    label: t.label().to_string(),
                    selected: Some(t) == current_type,
                })
                .collect(),
        };

        let properties = allowed_properties(view, self.estimates_active())
            .into_iter()
            .map(|name| PropertyChip {
                name,
                label: name.label(),
                visible: state.properties.get(name),
            })
            .collect();

        ViewOptionsModel {
            views,
            group_by,
            order_by,
            issue_type,
            show_empty_groups,
            properties,
        }
    }

    /// Apply one interaction to the store.
    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        let view = self.store.state().view;
        match event {
            UiEvent::ViewSelected(raw) => {
                let next = ViewType::from_str(&raw)?;
                self.store.set_view(next);
            }
            UiEvent::GroupBySelected(raw) => {
                let key = GroupBy::from_str(&raw)?;
                if !allowed_group_by(view).contains(&key) {
                    return Err(unavailable(key, view));
                }
                self.store.set_group_by(key);
            }
            UiEvent::OrderBySelected(raw) => {
                let key = OrderBy::from_str(&raw)?;
                if !allowed_order_by(view, self.store.state().group_by).contains(&key) {
                    return Err(unavailable(key, view));
                }
                self.store.set_order_by(key);
            }
            UiEvent::IssueTypeSelected(raw) => {
                let issue_type = IssueTypeFilter::from_str(&raw)?;
                self.store
                    .set_filter(FilterKey::Type, FilterValue::scalar(issue_type.as_str()))?;
            }
            UiEvent::EmptyGroupsToggled(show) => {
                if !shows_layout_controls(view) {
                    return Err(unavailable("show_empty_groups", view));
                }
                self.store.set_show_empty_groups(show);
            }
            UiEvent::PropertyClicked(raw) => {
                let name = PropertyName::from_str(&raw)?;
                if !allowed_properties(view, self.estimates_active()).contains(&name) {
                    return Err(unavailable(name, view));
                }
                self.store.toggle_property(name);
            }
            UiEvent::FilterSelected { key, value } => {
                let key = FilterKey::from_str(&key)?;
                self.select_filter(key, value)?;
            }
            UiEvent::FiltersCleared => self.store.clear_filters(),
        }
        Ok(())
    }

    /// Route a filter selection to the store.
    ///
    /// Date keys compare the clicked set against the stored one first: the
    /// same set clears the filter, a different set replaces it.
    fn select_filter(&mut self, key: FilterKey, value: FilterValue) -> Result<()> {
        if key.kind() != FilterKind::DateSet {
            return self.store.set_filter(key, value);
        }

        let FilterValue::List(values) = value else {
            return Err(VistaError::filter_value(key, "expected a list of date entries"));
        };
        let values = canonical_dates(key, values)?;
        let current = self.store.state().filters.list(key).unwrap_or_default();
        if same_elements(current, &values) {
            self.store.assign_filter(key, None)
        } else {
            self.store.assign_filter(key, Some(FilterValue::List(values)))
        }
    }
}

fn unavailable(option: impl ToString, view: ViewType) -> VistaError {
    VistaError::OptionUnavailable {
        option: option.to_string(),
        view: view.to_string(),
    }
}
