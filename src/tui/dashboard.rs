// Dashboard screen: one table of properties for the preferred network,
// one table of its members, and a status line.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::refresh::RefreshOutcome;
use crate::zerotier::{Member, Network};

#[derive(Default)]
pub struct DashboardState {
    pub network: Option<Network>,
    pub members: Vec<Member>,
    pub notice: Option<String>,
    pub refreshing: bool,
}

impl DashboardState {
    /// Fold a finished refresh cycle into the displayed state.
    pub fn apply(&mut self, outcome: RefreshOutcome) {
        self.refreshing = false;
        match outcome {
            RefreshOutcome::NotConfigured => {
                self.network = None;
                self.members.clear();
                self.notice =
                    Some("No ZeroTier token configured. Press 's' to set one".to_string());
            }
            RefreshOutcome::NoNetworks => {
                self.network = None;
                self.members.clear();
                self.notice = Some("This token has no networks yet".to_string());
            }
            RefreshOutcome::PreferredMissing { id } => {
                self.network = None;
                self.members.clear();
                self.notice = Some(format!("Preferred network {id} not found"));
            }
            RefreshOutcome::Ready { network, members } => {
                self.network = Some(network);
                self.members = members;
                self.notice = None;
            }
            // Keep the stale tables; just surface the failure.
            RefreshOutcome::Failed(text) => {
                self.notice = Some(text);
            }
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    render_network_table(frame, chunks[0], state.network.as_ref());
    render_member_table(frame, chunks[1], &state.members);
    render_status(frame, chunks[2], state);
}

fn render_network_table(frame: &mut Frame, area: Rect, network: Option<&Network>) {
    let rows: Vec<Row> = match network {
        Some(n) => vec![
            Row::new(vec!["Network Id".to_string(), n.id.clone()]),
            Row::new(vec!["Network Name".to_string(), n.name.clone()]),
            Row::new(vec!["Description".to_string(), n.description.clone()]),
            Row::new(vec![
                "Members Count".to_string(),
                n.authorized_member_count.to_string(),
            ]),
            Row::new(vec![
                "Created Date".to_string(),
                n.created_date.to_string(),
            ]),
        ],
        None => vec![],
    };

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(Block::default().borders(Borders::ALL).title(" Network "));
    frame.render_widget(table, area);
}

fn render_member_table(frame: &mut Frame, area: Rect, members: &[Member]) {
    let now = Local::now();
    let rows: Vec<Row> = members
        .iter()
        .map(|m| {
            Row::new(vec![
                m.id.clone(),
                m.name.clone(),
                m.ip_assignments.join(", "),
                humanize_since(m.last_seen, now),
                m.client_version.clone(),
                m.physical_address.clone(),
            ])
        })
        .collect();

    let header = Row::new(vec![
        "Id",
        "Name",
        "IP Assignments",
        "Last Seen",
        "Client Version",
        "Physical Address",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Members "));
    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let text = match (&state.notice, state.refreshing) {
        (Some(notice), _) => notice.clone(),
        (None, true) => "Refreshing…".to_string(),
        (None, false) => "d Dashboard  s Settings  a About  r Refresh  q Quit".to_string(),
    };
    let style = if state.notice.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(Paragraph::new(Line::styled(text, style)), area);
}

/// Compact "how long ago" rendering for the member table.
pub fn humanize_since(then: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 0 {
        return "just now".to_string();
    }
    match secs {
        0..=59 => format!("{secs}s ago"),
        60..=3_599 => format!("{}m ago", secs / 60),
        3_600..=86_399 => format!("{}h ago", secs / 3_600),
        _ => format!("{}d ago", secs / 86_400),
    }
}
