//! UI rendering for the TUI.

use chatlens_core::{
    format, timeline, AnalysisReport, ChatEvent, Sentiment, SentimentLevel, SessionStatus,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

// ========== View Colors ==========
// Consistent colors across the dashboard panels

/// Customer track and badge color
const TRACK_CUSTOMER: Color = Color::Rgb(130, 135, 255);
/// Agent track and badge color
const TRACK_AGENT: Color = Color::Rgb(90, 200, 140);
/// Border color for the Session Info block
const BORDER_INFO: Color = Color::Rgb(0, 150, 150);
/// Border color for the Sentiment Timeline block
const BORDER_CHART: Color = Color::Rgb(80, 160, 80);
/// Border color for the Chat History block
const BORDER_CHAT: Color = Color::Rgb(180, 100, 180);
/// Label color for metadata attributes
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Positive sentiment
const SENTIMENT_POSITIVE: Color = Color::Rgb(80, 200, 80);
/// Neutral sentiment
const SENTIMENT_NEUTRAL: Color = Color::Rgb(210, 190, 60);
/// Negative sentiment
const SENTIMENT_NEGATIVE: Color = Color::Rgb(220, 80, 80);

/// Throbber frames for the loading screen
const THROBBER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.session.status() {
        SessionStatus::Idle => render_idle_view(frame, app),
        SessionStatus::Loading => render_loading_view(frame, app),
        SessionStatus::Failed(reason) => render_failed_view(frame, app, reason),
        SessionStatus::Ready(report) => render_dashboard(frame, app, report),
    }
}

/// Render the idle view (no upload submitted yet).
fn render_idle_view(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let lines = vec![
        Line::from(Span::styled(
            "chatlens",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("No chat log loaded."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Start with "),
            Span::styled("chatlens <file>", Style::default().fg(Color::Yellow)),
            Span::raw(" to upload a transcript for analysis."),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, centered(area, 60, 9));
    render_footer(frame, app, footer_area(area));
}

/// Render the loading view while an upload is in flight.
fn render_loading_view(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let throbber = THROBBER[(app.animation_frame as usize) % THROBBER.len()];
    let file = app
        .current_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Analyzing chat log...", throbber),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(file, Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, centered(area, 60, 7));
    render_footer(frame, app, footer_area(area));
}

/// Render the failed view with the service's reason.
fn render_failed_view(frame: &mut Frame, app: &App, reason: &str) {
    let area = frame.area();
    let lines = vec![
        Line::from(Span::styled(
            "Analysis failed",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("u", Style::default().fg(Color::Yellow)),
            Span::raw(" to upload again."),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(paragraph, centered(area, 70, 9));
    render_footer(frame, app, footer_area(area));
}

/// Render the ready view: scores, chart, info, transcript, feedback.
fn render_dashboard(frame: &mut Frame, app: &App, report: &AnalysisReport) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3),  // Score strip
        Constraint::Length(14), // Info + chart row
        Constraint::Min(6),     // Transcript
        Constraint::Length(5),  // Feedback
        Constraint::Length(1),  // Footer
    ])
    .split(area);

    render_score_strip(frame, report, chunks[0]);

    let middle = Layout::horizontal([Constraint::Length(38), Constraint::Min(30)]).split(chunks[1]);
    render_info_panel(frame, report, middle[0]);
    render_sentiment_chart(frame, app, report, middle[1]);

    render_transcript(frame, app, report, chunks[2]);
    render_feedback(frame, report, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Render the four analysis scores in one strip.
fn render_score_strip(frame: &mut Frame, report: &AnalysisReport, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Analysis ")
        .title_style(Style::default().fg(Color::Cyan).bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(inner);

    let scores = [
        ("Overall", report.overall_score),
        ("Response Time", report.response_time_score),
        ("Customer Sentiment", report.customer_sentiment_score),
        ("Agent Sentiment", report.agent_sentiment_score),
    ];

    for (column, (label, value)) in columns.iter().zip(scores) {
        let line = Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(LABEL_COLOR)),
            Span::styled(
                format::format_score(value),
                Style::default().fg(Color::White).bold(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), *column);
    }
}

/// Render the session info panel (ids, times, rating, tags).
fn render_info_panel(frame: &mut Frame, report: &AnalysisReport, area: Rect) {
    let data = &report.chat_data;
    let mut lines = Vec::new();

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(LABEL_COLOR)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    lines.push(field("Session", data.session_id.clone()));
    lines.push(field("Agent", data.agent_id.clone()));
    lines.push(field("Channel", data.channel.clone()));
    lines.push(field("Start", data.start_time.clone()));
    lines.push(field("End", data.end_time.clone()));

    let duration = data
        .duration()
        .map(|d| format::format_duration_secs(d.num_seconds()))
        .unwrap_or_else(|| "—".to_string());
    lines.push(field("Duration", duration));

    let rating = data
        .session_metadata
        .rating
        .map(format::format_score)
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(field("Rating", rating));

    let tags = if data.session_metadata.tags.is_empty() {
        "N/A".to_string()
    } else {
        data.session_metadata.tags.join(", ")
    };
    lines.push(field("Tags", tags));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_INFO))
            .title(" Session Info ")
            .title_style(Style::default().fg(BORDER_INFO).bold()),
    );
    frame.render_widget(paragraph, area);
}

/// Render the two-track sentiment chart.
///
/// The value axis is the fixed three-level scale; tracks hidden by the
/// session's visibility flags are simply not plotted.
fn render_sentiment_chart(frame: &mut Frame, app: &App, report: &AnalysisReport, area: Rect) {
    let visibility = app.session.visibility();

    let title = format!(
        " Sentiment Timeline [c]ustomer:{} [a]gent:{} ",
        if visibility.customer { "on" } else { "off" },
        if visibility.agent { "on" } else { "off" },
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_CHART))
        .title(title)
        .title_style(Style::default().fg(BORDER_CHART).bold());

    let rows = match timeline::build(&report.chat_data.messages) {
        Ok(rows) => rows,
        Err(e) => {
            // A malformed timestamp fails the whole pivot; show it instead
            // of a silently truncated chart.
            let paragraph = Paragraph::new(Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::styled(e.to_string(), Style::default().fg(Color::DarkGray)),
            ]))
            .wrap(Wrap { trim: true })
            .block(block.border_style(Style::default().fg(Color::Red)));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    if rows.is_empty() {
        let paragraph = Paragraph::new("No messages to plot")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // One x step per timeline row; each track keeps its own points so gaps
    // stay gaps instead of dropping to a default ordinal.
    let customer_points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.customer.map(|l| (i as f64, f64::from(l.ordinal()))))
        .collect();
    let agent_points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.agent.map(|l| (i as f64, f64::from(l.ordinal()))))
        .collect();

    let mut datasets = Vec::new();
    if visibility.customer {
        datasets.push(
            Dataset::default()
                .name("Customer")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(TRACK_CUSTOMER))
                .data(&customer_points),
        );
    }
    if visibility.agent {
        datasets.push(
            Dataset::default()
                .name("Agent")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(TRACK_AGENT))
                .data(&agent_points),
        );
    }

    let x_max = (rows.len().saturating_sub(1)).max(1) as f64;
    let x_labels = vec![
        Span::styled(
            rows.first().map(|r| r.label.clone()).unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            rows.last().map(|r| r.label.clone()).unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let y_labels: Vec<Span> = SentimentLevel::AXIS
        .iter()
        .map(|level| Span::styled(level.display_name(), Style::default().fg(sentiment_color_level(*level))))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(y_labels)
                .style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(chart, area);
}

/// Render the scrollable transcript panel.
fn render_transcript(frame: &mut Frame, app: &App, report: &AnalysisReport, area: Rect) {
    let messages = &report.chat_data.messages;
    let offset = app.transcript_offset.min(messages.len().saturating_sub(1));

    let lines: Vec<Line> = messages
        .iter()
        .skip(offset)
        .map(transcript_line)
        .collect();

    let title = format!(" Chat History ({} messages) ", messages.len());
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_CHAT))
            .title(title)
            .title_style(Style::default().fg(BORDER_CHAT).bold()),
    );
    frame.render_widget(paragraph, area);
}

/// Build one transcript line: timestamp, sender badge, sentiment-colored text.
fn transcript_line(message: &ChatEvent) -> Line<'_> {
    let (badge, badge_color) = match message.sender {
        chatlens_core::Sender::Customer => ("CUST", TRACK_CUSTOMER),
        chatlens_core::Sender::Agent => ("AGNT", TRACK_AGENT),
    };

    Line::from(vec![
        Span::styled(
            format!("{} ", message.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("[{}] ", badge),
            Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            message.text.clone(),
            Style::default().fg(sentiment_color(message.sentiment)),
        ),
    ])
}

/// Render the feedback panel.
fn render_feedback(frame: &mut Frame, report: &AnalysisReport, area: Rect) {
    let text = if report.feedback.is_empty() {
        Span::styled("No feedback provided", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(report.feedback.clone(), Style::default().fg(Color::White))
    };
    let paragraph = Paragraph::new(Line::from(text)).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Feedback ")
            .title_style(Style::default().fg(Color::Cyan).bold()),
    );
    frame.render_widget(paragraph, area);
}

/// Render the key-hint footer.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec!["q quit", "c toggle customer", "a toggle agent"];
    if app.current_file.is_some() {
        hints.push("u re-upload");
    }
    if app.session.report().is_some() {
        hints.push("j/k scroll");
    }
    let footer = Paragraph::new(hints.join("  |  "))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Color for a wire sentiment value.
fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => SENTIMENT_POSITIVE,
        Sentiment::Neutral => SENTIMENT_NEUTRAL,
        Sentiment::Negative => SENTIMENT_NEGATIVE,
        Sentiment::Unknown => Color::Gray,
    }
}

/// Color for a chart ordinal level.
fn sentiment_color_level(level: SentimentLevel) -> Color {
    match level {
        SentimentLevel::Positive => SENTIMENT_POSITIVE,
        SentimentLevel::Neutral => SENTIMENT_NEUTRAL,
        SentimentLevel::Negative => SENTIMENT_NEGATIVE,
    }
}

/// A centered rect of at most `width` x `height` within `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// The bottom line of the full frame, for the footer.
fn footer_area(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    }
}
