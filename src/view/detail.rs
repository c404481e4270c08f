//! Listing detail pane with comments and the comment input box.

use super::constants::COMMENT_INPUT_HEIGHT;
use super::styles::{category_color, ColorConfig, KEY_HINT, MUTED_TEXT, SECTION_HEADER};
use crate::catalog::{CommentDraft, MAX_COMMENT_CHARS};
use crate::model::Listing;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_line(label: &'static str, value: String, colors: ColorConfig) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<9}"), colors.apply(MUTED_TEXT)),
        Span::raw(value),
    ])
}

/// Body lines for `listing`.
pub fn detail_lines(listing: &Listing, colors: ColorConfig) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            listing.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            listing.category.label(),
            colors.apply(Style::default().fg(category_color(listing.category))),
        ),
        Line::default(),
    ];

    if let Some(location) = listing.location_label() {
        lines.push(field_line("Where", location, colors));
    }
    if let Some(address) = &listing.address {
        lines.push(field_line("Address", address.clone(), colors));
    }
    if let Some(cuisine) = listing.cuisine {
        lines.push(field_line("Cuisine", cuisine.label().to_string(), colors));
    }
    if let Some(date) = listing.event_date {
        lines.push(field_line("Date", date.format("%a %e %b %Y").to_string(), colors));
    }
    if let Some(price) = &listing.price {
        lines.push(field_line("Price", price.clone(), colors));
    }
    if let Some(contact) = &listing.contact {
        lines.push(field_line("Contact", contact.clone(), colors));
    }
    if let Some(created) = listing.created_at {
        lines.push(field_line(
            "Posted",
            created.format("%Y-%m-%d %H:%M UTC").to_string(),
            colors,
        ));
    }

    if !listing.description.is_empty() {
        lines.push(Line::default());
        lines.extend(
            listing
                .description
                .lines()
                .map(|l| Line::from(l.to_string())),
        );
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        format!("Comments ({})", listing.comments.len()),
        colors.apply(SECTION_HEADER),
    ));
    if listing.comments.is_empty() {
        lines.push(Line::styled("  No comments yet.", colors.apply(MUTED_TEXT)));
    }
    for comment in &listing.comments {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} ", comment.author),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                comment.created_at.format("%Y-%m-%d").to_string(),
                colors.apply(MUTED_TEXT),
            ),
        ]));
        lines.push(Line::from(format!("    {}", comment.body)));
    }

    lines
}

/// Render the detail pane, with the comment box when a draft is open.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    listing: &Listing,
    draft: Option<&CommentDraft>,
    colors: ColorConfig,
) {
    let (body_area, input_area) = match draft {
        Some(_) => {
            let [body, input] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(COMMENT_INPUT_HEIGHT)])
                    .areas(area);
            (body, Some(input))
        }
        None => (area, None),
    };

    let hint = Line::from(vec![
        Span::styled(" c ", colors.apply(KEY_HINT)),
        Span::raw("comment  "),
        Span::styled("Esc ", colors.apply(KEY_HINT)),
        Span::raw("close "),
    ]);
    let body = Paragraph::new(detail_lines(listing, colors))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .title_bottom(hint),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(body, body_area);

    if let (Some(draft), Some(input_area)) = (draft, input_area) {
        let count = draft.body().chars().count();
        let counter_style = if count > MAX_COMMENT_CHARS {
            Style::default().fg(Color::Red)
        } else {
            MUTED_TEXT
        };
        let input = Paragraph::new(Line::from(vec![
            Span::raw(draft.body().to_string()),
            Span::styled(" ", Style::default().bg(Color::White)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Comment (Enter to post, Esc to cancel) ")
                .title_bottom(Line::styled(
                    format!(" {count}/{MAX_COMMENT_CHARS} "),
                    colors.apply(counter_style),
                )),
        );
        frame.render_widget(input, input_area);
    }
}
