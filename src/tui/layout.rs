//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListState, Paragraph};

use super::runtime::App;
use super::style;
use crate::report::thousands;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(7),  // inputs
            Constraint::Length(3),  // slider
            Constraint::Length(11), // results
            Constraint::Min(10),    // charts
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_inputs(frame, app, chunks[1]);
    render_slider(frame, app, chunks[2]);
    render_results(frame, app, chunks[3]);
    render_charts(frame, app, chunks[4]);
    render_footer(frame, chunks[5]);
}

/// Header bar: title, preset, weather banner.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " PV-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.title(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" │ {} │ {}", app.preset_name, app.weather.label())),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Panel type selector.
fn render_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let names = app.panel_names();
    let list = List::new(names)
        .block(Block::default().title(" Type de panneau ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.panel_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Panel count slider.
fn render_slider(frame: &mut Frame, app: &App, area: Rect) {
    let s = app.slider;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" Nombre de panneaux ({}–{}) ", s.min, s.max))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::SLIDER_COLOR))
        .ratio(style::slider_ratio(app.panel_count, s.min, s.max))
        .label(app.panel_count.to_string());
    frame.render_widget(gauge, area);
}

/// Summary of the latest result, or the calculator error.
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Résultats de simulation ")
        .borders(Borders::ALL);

    let lines = match &app.result {
        Ok(r) => {
            let site = app.calculator().site();
            let mut lines = vec![
                Line::from(format!("  Surface installée :   {:.2} m²", r.total_area_m2)),
                Line::from(format!("  Puissance installée : {:.2} kWc", r.installed_power_kwp)),
                Line::from(format!(
                    "  Production estimée :  {:.0} kWh/an",
                    r.annual_production_kwh
                )),
                Line::from(format!("  Autoconsommée :       {:.0} kWh/an", r.self_consumed_kwh)),
                Line::from(format!("  Réseau requis :       {:.0} kWh/an", r.grid_draw_kwh)),
                Line::from(format!("  Surplus injecté :     {:.0} kWh/an", r.grid_surplus_kwh)),
                Line::from(format!(
                    "  Coût estimé :         {} €   (autonomie {:.1}%)",
                    thousands(r.installation_cost),
                    r.self_sufficiency_percent(site)
                )),
            ];
            if let Some(fin) = &r.financials {
                lines.push(Line::from(format!(
                    "  Économie estimée :    {:.0} €/an",
                    fin.annual_savings
                )));
                lines.push(Line::from(match fin.roi_percent {
                    Some(roi) => format!(
                        "  ROI sur {} ans :       {roi:.2} %",
                        app.calculator().tariff().roi_horizon_years
                    ),
                    None => "  ROI :                 n/a".to_string(),
                }));
            }
            lines
        }
        Err(e) => vec![Line::from(Span::styled(
            format!("  {e}"),
            Style::default().fg(style::ERROR_FG),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Production vs consumption, and the energy split.
fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let Ok(r) = &app.result else {
        return;
    };
    let consumption = app.calculator().site().annual_consumption_kwh;

    let balance = [
        bar("Production", r.annual_production_kwh, style::PRODUCTION_COLOR),
        bar("Consommation", consumption, style::CONSUMPTION_COLOR),
    ];
    let balance_chart = BarChart::default()
        .block(
            Block::default()
                .title(" Production vs Besoin (kWh/an) ")
                .borders(Borders::ALL),
        )
        .bar_width(12)
        .bar_gap(2)
        .data(BarGroup::default().bars(&balance));
    frame.render_widget(balance_chart, chunks[0]);

    let split = [
        bar("Autoconso.", r.self_consumed_kwh, style::SELF_CONSUMED_COLOR),
        bar("Injectée", r.grid_surplus_kwh, style::SURPLUS_COLOR),
        bar("Réseau", r.grid_draw_kwh, style::GRID_DRAW_COLOR),
    ];
    let split_chart = BarChart::default()
        .block(
            Block::default()
                .title(" Répartition de l'énergie (kWh/an) ")
                .borders(Borders::ALL),
        )
        .bar_width(10)
        .bar_gap(2)
        .data(BarGroup::default().bars(&split));
    frame.render_widget(split_chart, chunks[1]);
}

fn bar(label: &'static str, kwh: f64, color: ratatui::style::Color) -> Bar<'static> {
    Bar::default()
        .value(style::bar_value(kwh))
        .label(Line::from(label))
        .style(Style::default().fg(color))
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ↑/↓:Panneau  ←/→:Nombre  f:ROI  w:Météo  1-4:Preset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
