//! Deterministic mapping from a component forest to styled terminal lines.
//!
//! The same component value always yields the same lines. Interactive nodes
//! (buttons, inputs, tab bars) are additionally registered in render order
//! so an event loop can drive focus and dispatch; form scopes are computed
//! here so submission can aggregate input values without re-walking the
//! tree. Containers recurse structurally, with two exceptions mandated by
//! the protocol: tabs render only the active tab's subtree and cards render
//! children only within their body and footer slots.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::event::display_value;
use crate::core::schema::{
    Chart, ChartKind, Component, IconSize, StackDirection, Table, TextVariant,
};
use crate::ui::interaction::InteractionState;
use crate::ui::theme::Theme;

const MAX_TABLE_COLUMN_WIDTH: usize = 32;
const CHART_BAR_WIDTH: usize = 24;

/// One interactive element, addressable by its position in render order.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveNode {
    /// Index of the line the element starts on.
    pub line: usize,
    pub target: InteractiveTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractiveTarget {
    Button {
        action_id: String,
        disabled: bool,
        /// Index into [`RenderedUi::forms`] when the button sits inside an
        /// input-bearing container.
        form: Option<usize>,
    },
    Input {
        name: String,
    },
    TabBar {
        key: String,
        tab_count: usize,
        active: usize,
    },
}

/// An input-bearing container: the set of field names a submission from
/// inside it aggregates, plus the action id of its first button (if any).
#[derive(Debug, Clone, PartialEq)]
pub struct FormScope {
    pub action_id: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RenderedUi {
    pub lines: Vec<Line<'static>>,
    pub interactive: Vec<InteractiveNode>,
    pub forms: Vec<FormScope>,
}

struct RenderCtx<'a> {
    state: &'a InteractionState,
    theme: &'a Theme,
    width: u16,
    out: RenderedUi,
    prefix: String,
    form_stack: Vec<usize>,
    path: Vec<usize>,
}

/// Renders a forest into lines plus the interactive registry. `width` is
/// the target terminal width, used for dividers and table sizing; content
/// wider than it is left to the embedder's wrapping.
pub fn render(
    components: &[Component],
    state: &InteractionState,
    theme: &Theme,
    width: u16,
) -> RenderedUi {
    let mut ctx = RenderCtx {
        state,
        theme,
        width,
        out: RenderedUi::default(),
        prefix: String::new(),
        form_stack: Vec::new(),
        path: Vec::new(),
    };
    render_children(&mut ctx, components);
    ctx.out
}

fn render_children(ctx: &mut RenderCtx, components: &[Component]) {
    for (index, component) in components.iter().enumerate() {
        ctx.path.push(index);
        render_component(ctx, component);
        ctx.path.pop();
    }
}

fn push_line(ctx: &mut RenderCtx, spans: Vec<Span<'static>>) {
    let mut all = Vec::with_capacity(spans.len() + 1);
    if !ctx.prefix.is_empty() {
        all.push(Span::styled(ctx.prefix.clone(), ctx.theme.card_border_style));
    }
    all.extend(spans);
    ctx.out.lines.push(Line::from(all));
}

fn push_styled(ctx: &mut RenderCtx, text: String, style: Style) {
    push_line(ctx, vec![Span::styled(text, style)]);
}

/// True when the subtree holds at least one named input, i.e. the node can
/// act as a form scope.
fn has_input_descendant(component: &Component) -> bool {
    if input_name(component).is_some() {
        return true;
    }
    component
        .child_slots()
        .iter()
        .any(|slot| slot.iter().any(has_input_descendant))
}

fn input_name(component: &Component) -> Option<&str> {
    match component {
        Component::TextInput(c) => Some(&c.name),
        Component::NumberInput(c) => Some(&c.name),
        Component::DateInput(c) => Some(&c.name),
        Component::Slider(c) => Some(&c.name),
        Component::Select(c) => Some(&c.name),
        Component::MultiSelect(c) => Some(&c.name),
        Component::Switch(c) => Some(&c.name),
        _ => None,
    }
}

fn collect_input_names(components: &[Component], into: &mut Vec<String>) {
    for component in components {
        if let Some(name) = input_name(component) {
            if !into.iter().any(|existing| existing == name) {
                into.push(name.to_string());
            }
        }
        for slot in component.child_slots() {
            collect_input_names(slot, into);
        }
    }
}

fn first_button_action(components: &[Component]) -> Option<String> {
    for component in components {
        if let Component::Button(button) = component {
            return Some(button.action_id.clone());
        }
        for slot in component.child_slots() {
            if let Some(action) = first_button_action(slot) {
                return Some(action);
            }
        }
    }
    None
}

/// Opens a form scope for `component` if its subtree holds inputs. Returns
/// whether a scope was pushed.
fn enter_form_scope(ctx: &mut RenderCtx, component: &Component) -> bool {
    if !has_input_descendant(component) {
        return false;
    }
    let mut fields = Vec::new();
    for slot in component.child_slots() {
        collect_input_names(slot, &mut fields);
    }
    let mut action_id = None;
    for slot in component.child_slots() {
        if let Some(action) = first_button_action(slot) {
            action_id = Some(action);
            break;
        }
    }
    ctx.out.forms.push(FormScope { action_id, fields });
    ctx.form_stack.push(ctx.out.forms.len() - 1);
    true
}

fn leave_form_scope(ctx: &mut RenderCtx, entered: bool) {
    if entered {
        ctx.form_stack.pop();
    }
}

fn register(ctx: &mut RenderCtx, target: InteractiveTarget) -> usize {
    let index = ctx.out.interactive.len();
    ctx.out.interactive.push(InteractiveNode {
        line: ctx.out.lines.len(),
        target,
    });
    index
}

fn is_focused(ctx: &RenderCtx, interactive_index: usize) -> bool {
    ctx.state.focus == Some(interactive_index)
}

fn render_component(ctx: &mut RenderCtx, component: &Component) {
    match component {
        Component::Text(text) => {
            let style = match text.variant {
                TextVariant::H1 | TextVariant::H2 | TextVariant::H3 => ctx.theme.heading_style,
                TextVariant::Body => ctx.theme.body_style,
                TextVariant::Caption => ctx.theme.caption_style,
                TextVariant::Code => ctx.theme.code_style,
            };
            let content = match text.variant {
                TextVariant::H1 => format!("━ {} ━", text.content),
                TextVariant::H2 => format!("─ {} ─", text.content),
                _ => text.content.clone(),
            };
            push_styled(ctx, content, style);
        }
        Component::Button(button) => {
            let form = if button.disabled {
                None
            } else {
                ctx.form_stack.last().copied()
            };
            let index = register(
                ctx,
                InteractiveTarget::Button {
                    action_id: button.action_id.clone(),
                    disabled: button.disabled,
                    form,
                },
            );
            let style = if button.disabled {
                ctx.theme.button_disabled_style
            } else if is_focused(ctx, index) {
                ctx.theme.button_focused_style
            } else {
                ctx.theme.button_style
            };
            push_styled(ctx, format!("[ {} ]", button.label), style);
        }
        Component::Icon(icon) => {
            let glyph = match icon.size {
                IconSize::Small => "·",
                IconSize::Medium => "◆",
                IconSize::Large => "◈",
            };
            push_styled(ctx, format!("{glyph} {}", icon.name), ctx.theme.caption_style);
        }
        Component::Image(image) => {
            let label = image.alt.as_deref().unwrap_or(&image.src);
            push_styled(ctx, format!("[image: {label}]"), ctx.theme.caption_style);
        }
        Component::Badge(badge) => {
            let style = ctx.theme.badge_style(badge.variant);
            push_styled(ctx, format!(" {} ", badge.label), style);
        }
        Component::TextInput(input) => {
            render_input_line(
                ctx,
                &input.name,
                &input.label,
                input.required,
                input.error.as_deref(),
                |state| {
                    state
                        .value_of(&input.name)
                        .map(display_value)
                        .or_else(|| input.default_value.clone())
                        .or_else(|| input.placeholder.clone())
                        .unwrap_or_default()
                },
            );
        }
        Component::NumberInput(input) => {
            render_input_line(
                ctx,
                &input.name,
                &input.label,
                input.required,
                input.error.as_deref(),
                |state| {
                    state
                        .value_of(&input.name)
                        .map(display_value)
                        .or_else(|| input.default_value.map(|v| v.to_string()))
                        .unwrap_or_default()
                },
            );
        }
        Component::DateInput(input) => {
            render_input_line(
                ctx,
                &input.name,
                &input.label,
                input.required,
                input.error.as_deref(),
                |state| {
                    state
                        .value_of(&input.name)
                        .map(display_value)
                        .or_else(|| input.default_value.clone())
                        .unwrap_or_default()
                },
            );
        }
        Component::Slider(input) => {
            let bounds = match (input.min, input.max) {
                (Some(min), Some(max)) => format!(" ({min}–{max})"),
                _ => String::new(),
            };
            let label = format!("{}{bounds}", input.label);
            render_input_line(
                ctx,
                &input.name,
                &label,
                input.required,
                input.error.as_deref(),
                |state| {
                    state
                        .value_of(&input.name)
                        .map(display_value)
                        .or_else(|| input.default_value.map(|v| v.to_string()))
                        .unwrap_or_default()
                },
            );
        }
        Component::Select(input) => {
            render_input_line(
                ctx,
                &input.name,
                &input.label,
                input.required,
                input.error.as_deref(),
                |state| {
                    let selected = state
                        .value_of(&input.name)
                        .map(display_value)
                        .or_else(|| input.default_value.clone())
                        .unwrap_or_default();
                    input
                        .options
                        .iter()
                        .find(|option| option.value == selected)
                        .map(|option| option.label.clone())
                        .unwrap_or(selected)
                },
            );
        }
        Component::MultiSelect(input) => {
            render_input_line(
                ctx,
                &input.name,
                &input.label,
                input.required,
                input.error.as_deref(),
                |state| match state.value_of(&input.name) {
                    Some(serde_json::Value::Array(values)) => values
                        .iter()
                        .map(display_value)
                        .collect::<Vec<_>>()
                        .join(", "),
                    Some(other) => display_value(other),
                    None => input.default_value.join(", "),
                },
            );
        }
        Component::Switch(input) => {
            let on = match ctx.state.value_of(&input.name) {
                Some(serde_json::Value::Bool(b)) => *b,
                _ => input.default_value,
            };
            let index = register(
                ctx,
                InteractiveTarget::Input {
                    name: input.name.clone(),
                },
            );
            let marker = if on { "[x]" } else { "[ ]" };
            let style = if is_focused(ctx, index) {
                ctx.theme.button_focused_style
            } else {
                ctx.theme.input_value_style
            };
            push_line(
                ctx,
                vec![
                    Span::styled(format!("{marker} "), style),
                    Span::styled(input.label.clone(), ctx.theme.input_label_style),
                ],
            );
            if let Some(error) = &input.error {
                push_styled(ctx, format!("  ⚠ {error}"), ctx.theme.input_error_style);
            }
        }
        Component::Stack(stack) => match stack.direction {
            StackDirection::Vertical => {
                let entered = enter_form_scope(ctx, component);
                render_children(ctx, &stack.children);
                leave_form_scope(ctx, entered);
            }
            StackDirection::Horizontal => {
                let entered = enter_form_scope(ctx, component);
                render_horizontal(ctx, &stack.children);
                leave_form_scope(ctx, entered);
            }
        },
        Component::Grid(grid) => {
            let entered = enter_form_scope(ctx, component);
            let columns = grid.columns.max(1) as usize;
            for chunk in grid.children.chunks(columns) {
                render_horizontal(ctx, chunk);
            }
            leave_form_scope(ctx, entered);
        }
        Component::Card(card) => {
            let entered = enter_form_scope(ctx, component);
            let rule_width = (ctx.width as usize)
                .saturating_sub(ctx.prefix.width() + 2)
                .clamp(8, 60);
            push_styled(
                ctx,
                format!("┌{}", "─".repeat(rule_width)),
                ctx.theme.card_border_style,
            );
            let saved_prefix = ctx.prefix.clone();
            ctx.prefix.push_str("│ ");
            if let Some(title) = &card.title {
                push_styled(ctx, title.clone(), ctx.theme.card_title_style);
            }
            if let Some(description) = &card.description {
                push_styled(ctx, description.clone(), ctx.theme.caption_style);
            }
            render_children(ctx, &card.content);
            if let Some(footer) = &card.footer {
                push_styled(
                    ctx,
                    "─".repeat(rule_width.saturating_sub(2)),
                    ctx.theme.divider_style,
                );
                render_children(ctx, footer);
            }
            ctx.prefix = saved_prefix;
            push_styled(
                ctx,
                format!("└{}", "─".repeat(rule_width)),
                ctx.theme.card_border_style,
            );
            leave_form_scope(ctx, entered);
        }
        Component::Container(container) => {
            let entered = enter_form_scope(ctx, component);
            render_children(ctx, &container.children);
            leave_form_scope(ctx, entered);
        }
        Component::Divider(_) => {
            let rule_width = (ctx.width as usize)
                .saturating_sub(ctx.prefix.width())
                .clamp(8, 80);
            push_styled(ctx, "─".repeat(rule_width), ctx.theme.divider_style);
        }
        Component::Tabs(tabs) => {
            let key = tabs.id.clone().unwrap_or_else(|| {
                let path: Vec<String> = ctx.path.iter().map(|i| i.to_string()).collect();
                format!("tabs:{}", path.join("."))
            });
            let active = ctx.state.active_tab(&key).min(tabs.items.len().saturating_sub(1));
            let index = register(
                ctx,
                InteractiveTarget::TabBar {
                    key,
                    tab_count: tabs.items.len(),
                    active,
                },
            );
            let mut spans = Vec::new();
            for (tab_index, item) in tabs.items.iter().enumerate() {
                let style = if tab_index == active {
                    if is_focused(ctx, index) {
                        ctx.theme.button_focused_style
                    } else {
                        ctx.theme.tab_active_style
                    }
                } else {
                    ctx.theme.tab_inactive_style
                };
                spans.push(Span::styled(format!(" {} ", item.label), style));
                if tab_index + 1 < tabs.items.len() {
                    spans.push(Span::styled("│", ctx.theme.divider_style));
                }
            }
            push_line(ctx, spans);
            // only the active tab's subtree is materialized
            if let Some(item) = tabs.items.get(active) {
                render_children(ctx, &item.children);
            }
        }
        Component::Table(table) => render_table(ctx, table),
        Component::List(list) => {
            for (item_index, item) in list.items.iter().enumerate() {
                let bullet = if list.ordered {
                    format!("{}. ", item_index + 1)
                } else {
                    "• ".to_string()
                };
                push_line(
                    ctx,
                    vec![
                        Span::styled(bullet, ctx.theme.caption_style),
                        Span::styled(item.clone(), ctx.theme.body_style),
                    ],
                );
            }
        }
        Component::KeyValue(key_value) => {
            let key_width = key_value
                .pairs
                .iter()
                .map(|pair| pair.key.width())
                .max()
                .unwrap_or(0);
            for pair in &key_value.pairs {
                push_line(
                    ctx,
                    vec![
                        Span::styled(
                            format!("{:key_width$}  ", pair.key),
                            ctx.theme.input_label_style,
                        ),
                        Span::styled(display_value(&pair.value), ctx.theme.body_style),
                    ],
                );
            }
        }
        Component::CodeBlock(code_block) => {
            if let Some(language) = &code_block.language {
                push_styled(ctx, format!("({language})"), ctx.theme.caption_style);
            }
            for code_line in code_block.code.lines() {
                push_styled(ctx, code_line.to_string(), ctx.theme.code_style);
            }
        }
        Component::Chart(chart) => render_chart(ctx, chart),
        Component::Alert(alert) => {
            let style = ctx.theme.alert_style(alert.variant);
            let marker = match alert.variant {
                crate::core::schema::AlertVariant::Info => "ℹ",
                crate::core::schema::AlertVariant::Success => "✓",
                crate::core::schema::AlertVariant::Warning => "⚠",
                crate::core::schema::AlertVariant::Error => "✗",
            };
            push_styled(ctx, format!("{marker} {}", alert.title), style);
            if let Some(description) = &alert.description {
                push_styled(ctx, format!("  {description}"), ctx.theme.body_style);
            }
        }
        Component::Unknown(unknown) => {
            push_styled(
                ctx,
                format!("⚠ Unknown component type: {}", unknown.type_name),
                ctx.theme.placeholder_style,
            );
        }
    }
}

fn render_input_line(
    ctx: &mut RenderCtx,
    name: &str,
    label: &str,
    required: bool,
    error: Option<&str>,
    current: impl Fn(&InteractionState) -> String,
) {
    let index = register(
        ctx,
        InteractiveTarget::Input {
            name: name.to_string(),
        },
    );
    let value = current(ctx.state);
    let marker = if required { "*" } else { "" };
    let value_style = if is_focused(ctx, index) {
        ctx.theme.button_focused_style
    } else {
        ctx.theme.input_value_style
    };
    let shown_label = if label.is_empty() { name } else { label };
    push_line(
        ctx,
        vec![
            Span::styled(
                format!("{shown_label}{marker}: "),
                ctx.theme.input_label_style,
            ),
            Span::styled(format!("[{value}]"), value_style),
        ],
    );
    if let Some(error) = error {
        push_styled(ctx, format!("  ⚠ {error}"), ctx.theme.input_error_style);
    }
}

/// Lays out children on one line when every child renders to a single
/// line; otherwise falls back to vertical stacking.
fn render_horizontal(ctx: &mut RenderCtx, children: &[Component]) {
    let probe_state = ctx.state;
    let all_single = children.iter().all(|child| {
        let probe = render(std::slice::from_ref(child), probe_state, ctx.theme, ctx.width);
        probe.lines.len() == 1 && probe.interactive.is_empty()
    });
    if !all_single {
        render_children(ctx, children);
        return;
    }
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (index, child) in children.iter().enumerate() {
        ctx.path.push(index);
        let rendered = render(std::slice::from_ref(child), probe_state, ctx.theme, ctx.width);
        ctx.path.pop();
        if let Some(line) = rendered.lines.into_iter().next() {
            if index > 0 {
                spans.push(Span::raw("   "));
            }
            spans.extend(line.spans);
        }
    }
    push_line(ctx, spans);
}

fn render_table(ctx: &mut RenderCtx, table: &Table) {
    if table.columns.is_empty() {
        return;
    }
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|column| column.header.width())
        .collect();
    let cells: Vec<Vec<String>> = table
        .data
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .map(|column| {
                    row.get(&column.accessor_key)
                        .map(display_value)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    for row in &cells {
        for (column_index, cell) in row.iter().enumerate() {
            widths[column_index] = widths[column_index]
                .max(cell.width())
                .min(MAX_TABLE_COLUMN_WIDTH);
        }
    }

    let header_spans: Vec<Span<'static>> = table
        .columns
        .iter()
        .enumerate()
        .flat_map(|(column_index, column)| {
            let mut spans = Vec::new();
            if column_index > 0 {
                spans.push(Span::styled(" │ ", ctx.theme.divider_style));
            }
            spans.push(Span::styled(
                pad_cell(&column.header, widths[column_index]),
                ctx.theme.table_header_style,
            ));
            spans
        })
        .collect();
    push_line(ctx, header_spans);

    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    push_styled(ctx, rule.join("─┼─"), ctx.theme.divider_style);

    for row in cells {
        let row_spans: Vec<Span<'static>> = row
            .iter()
            .enumerate()
            .flat_map(|(column_index, cell)| {
                let mut spans = Vec::new();
                if column_index > 0 {
                    spans.push(Span::styled(" │ ", ctx.theme.divider_style));
                }
                spans.push(Span::styled(
                    pad_cell(cell, widths[column_index]),
                    ctx.theme.table_cell_style,
                ));
                spans
            })
            .collect();
        push_line(ctx, row_spans);
    }
}

fn pad_cell(content: &str, width: usize) -> String {
    let mut truncated = String::new();
    let mut used = 0usize;
    for ch in content.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push_str(&" ".repeat(width.saturating_sub(used)));
    truncated
}

fn numeric(value: Option<&serde_json::Value>) -> f64 {
    value.and_then(serde_json::Value::as_f64).unwrap_or(0.0)
}

fn render_chart(ctx: &mut RenderCtx, chart: &Chart) {
    if let Some(title) = &chart.title {
        push_styled(ctx, title.clone(), ctx.theme.heading_style);
    }
    if chart.data.is_empty() || chart.y_keys.is_empty() {
        push_styled(ctx, "(no data)".to_string(), ctx.theme.caption_style);
        return;
    }
    match chart.kind {
        ChartKind::Pie => {
            let y_key = &chart.y_keys[0];
            let total: f64 = chart.data.iter().map(|row| numeric(row.get(y_key))).sum();
            for row in &chart.data {
                let label = row.get(&chart.x_key).map(display_value).unwrap_or_default();
                let value = numeric(row.get(y_key));
                let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                push_line(
                    ctx,
                    vec![
                        Span::styled(format!("{label}: "), ctx.theme.input_label_style),
                        Span::styled(
                            format!("{value} ({share:.0}%)"),
                            ctx.theme.chart_style,
                        ),
                    ],
                );
            }
        }
        ChartKind::Bar | ChartKind::Line | ChartKind::Area => {
            let label_width = chart
                .data
                .iter()
                .map(|row| {
                    row.get(&chart.x_key)
                        .map(|v| display_value(v).width())
                        .unwrap_or(0)
                })
                .max()
                .unwrap_or(0);
            for y_key in &chart.y_keys {
                if chart.y_keys.len() > 1 {
                    push_styled(ctx, y_key.clone(), ctx.theme.caption_style);
                }
                let max = chart
                    .data
                    .iter()
                    .map(|row| numeric(row.get(y_key)))
                    .fold(f64::MIN, f64::max)
                    .max(0.0);
                for row in &chart.data {
                    let label = row.get(&chart.x_key).map(display_value).unwrap_or_default();
                    let value = numeric(row.get(y_key));
                    let bar_len = if max > 0.0 {
                        ((value / max) * CHART_BAR_WIDTH as f64).round().max(0.0) as usize
                    } else {
                        0
                    };
                    push_line(
                        ctx,
                        vec![
                            Span::styled(
                                format!("{:label_width$} ", label),
                                ctx.theme.input_label_style,
                            ),
                            Span::styled("█".repeat(bar_len), ctx.theme.chart_style),
                            Span::styled(format!(" {value}"), ctx.theme.caption_style),
                        ],
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::*;
    use serde_json::json;

    fn plain(components: &[Component]) -> RenderedUi {
        render(components, &InteractionState::new(), &Theme::dark_default(), 80)
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.clone()).collect()
    }

    #[test]
    fn same_tree_renders_identically() {
        let components = vec![Component::Text(Text {
            id: None,
            content: "stable".into(),
            variant: TextVariant::Body,
        })];
        let first = plain(&components);
        let second = plain(&components);
        assert_eq!(first.lines, second.lines);
        assert_eq!(first.interactive, second.interactive);
    }

    #[test]
    fn unknown_component_renders_flagged_placeholder() {
        let components = vec![Component::Unknown(UnknownComponent {
            type_name: "hologram".into(),
        })];
        let rendered = plain(&components);
        assert_eq!(
            line_text(&rendered.lines[0]),
            "⚠ Unknown component type: hologram"
        );
    }

    #[test]
    fn card_with_inputs_forms_a_scope_with_button_action() {
        let components = vec![Component::Card(Card {
            id: None,
            title: Some("Register".into()),
            description: None,
            content: vec![
                Component::TextInput(TextInput {
                    id: None,
                    name: "email".into(),
                    label: "Email".into(),
                    placeholder: None,
                    required: true,
                    default_value: None,
                    error: None,
                }),
                Component::Switch(Switch {
                    id: None,
                    name: "newsletter".into(),
                    label: "Subscribe".into(),
                    default_value: false,
                    error: None,
                }),
            ],
            footer: Some(vec![Component::Button(Button {
                id: None,
                label: "Save".into(),
                action_id: "save_profile".into(),
                variant: ButtonVariant::Primary,
                disabled: false,
            })]),
        })];
        let rendered = plain(&components);
        assert_eq!(rendered.forms.len(), 1);
        let form = &rendered.forms[0];
        assert_eq!(form.action_id.as_deref(), Some("save_profile"));
        assert_eq!(form.fields, vec!["email".to_string(), "newsletter".to_string()]);

        let button = rendered
            .interactive
            .iter()
            .find_map(|node| match &node.target {
                InteractiveTarget::Button { action_id, form, .. } => Some((action_id, form)),
                _ => None,
            })
            .expect("button registered");
        assert_eq!(button.0, "save_profile");
        assert_eq!(*button.1, Some(0));
    }

    #[test]
    fn bare_button_has_no_form_scope() {
        let components = vec![Component::Button(Button {
            id: None,
            label: "Go".into(),
            action_id: "go".into(),
            variant: ButtonVariant::Primary,
            disabled: false,
        })];
        let rendered = plain(&components);
        assert!(matches!(
            &rendered.interactive[0].target,
            InteractiveTarget::Button { form: None, .. }
        ));
    }

    #[test]
    fn tabs_render_only_active_subtree() {
        let components = vec![Component::Tabs(Tabs {
            id: Some("view".into()),
            items: vec![
                TabItem {
                    label: "One".into(),
                    children: vec![Component::Text(Text {
                        id: None,
                        content: "first tab body".into(),
                        variant: TextVariant::Body,
                    })],
                },
                TabItem {
                    label: "Two".into(),
                    children: vec![Component::Text(Text {
                        id: None,
                        content: "second tab body".into(),
                        variant: TextVariant::Body,
                    })],
                },
            ],
        })];
        let rendered = plain(&components);
        let all: String = rendered.lines.iter().map(line_text).collect();
        assert!(all.contains("first tab body"));
        assert!(!all.contains("second tab body"));

        let mut state = InteractionState::new();
        let mut dispatched = Vec::new();
        state.select_tab("view", 1, &mut |event| dispatched.push(event));
        let rendered = render(&components, &state, &Theme::dark_default(), 80);
        let all: String = rendered.lines.iter().map(line_text).collect();
        assert!(all.contains("second tab body"));
        assert!(!all.contains("first tab body"));
    }

    #[test]
    fn table_renders_header_and_missing_cells_empty() {
        let components = vec![Component::Table(Table {
            id: None,
            columns: vec![
                TableColumn {
                    header: "Name".into(),
                    accessor_key: "name".into(),
                },
                TableColumn {
                    header: "Age".into(),
                    accessor_key: "age".into(),
                },
            ],
            data: vec![
                serde_json::from_value(json!({"name": "Ada", "age": 36})).unwrap(),
                serde_json::from_value(json!({"name": "Grace"})).unwrap(),
            ],
        })];
        let rendered = plain(&components);
        assert!(line_text(&rendered.lines[0]).contains("Name"));
        assert!(line_text(&rendered.lines[2]).contains("Ada"));
        assert!(line_text(&rendered.lines[3]).contains("Grace"));
    }

    #[test]
    fn chart_bars_scale_to_max() {
        let components = vec![Component::Chart(Chart {
            id: None,
            title: None,
            kind: ChartKind::Bar,
            data: vec![
                serde_json::from_value(json!({"month": "Jan", "sales": 10})).unwrap(),
                serde_json::from_value(json!({"month": "Feb", "sales": 5})).unwrap(),
            ],
            x_key: "month".into(),
            y_keys: vec!["sales".into()],
        })];
        let rendered = plain(&components);
        let jan = line_text(&rendered.lines[0]);
        let feb = line_text(&rendered.lines[1]);
        let bars = |s: &str| s.chars().filter(|c| *c == '█').count();
        assert_eq!(bars(&jan), CHART_BAR_WIDTH);
        assert_eq!(bars(&feb), CHART_BAR_WIDTH / 2);
    }

    #[test]
    fn disabled_button_is_registered_but_inert() {
        let components = vec![Component::Button(Button {
            id: None,
            label: "Nope".into(),
            action_id: "nope".into(),
            variant: ButtonVariant::Secondary,
            disabled: true,
        })];
        let rendered = plain(&components);
        assert!(matches!(
            &rendered.interactive[0].target,
            InteractiveTarget::Button { disabled: true, .. }
        ));
    }
}
