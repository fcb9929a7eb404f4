//! # Content Region
//!
//! Renders the current fragment inside a `ScrollView`, block by block:
//!
//! ```text
//! Markdown   → markdown::render, wrapped
//! Bar        → label line + LineGauge (eased fill after the skills hook)
//! Disclosure → ▸/▾ header, body only when open
//! ```
//!
//! `ContentState` keeps what must survive between frames: the scroll
//! offset and its bound, each block's y offset (for anchor scrolling), the
//! disclosure header rows (for clicks), the focused interactive item, and
//! the bar fill clock.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{LineGauge, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::fragment::{Block, Fragment, Interactive};
use crate::core::i18n::t;
use crate::core::lang::Lang;
use crate::core::state::ScrollRequest;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;
use crate::tui::palette::Palette;

/// Duration of the skill bar fill.
pub const BAR_FILL: Duration = Duration::from_millis(900);

#[derive(Debug, Default)]
pub struct ContentState {
    pub scroll: ScrollViewState,
    block_offsets: Vec<u16>,
    /// Largest offset the view can scroll to; a block in the last screenful
    /// is reached at this offset, not at its own y.
    max_offset: u16,
    /// Where the view was last drawn on screen.
    viewport: Rect,
    /// `(content y, block index)` of every disclosure header.
    header_rows: Vec<(u16, usize)>,
    /// Smooth-scroll destination.
    target: Option<u16>,
    /// Offset set by the last scroll step.
    stepped_to: Option<u16>,
    focus: Option<usize>,
    interactives: Vec<Interactive>,
    rendered_rev: Option<u64>,
    /// Bars were all empty when this revision was first shown.
    bars_started_empty: bool,
    fill_started: Option<Instant>,
}

impl ContentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, request: ScrollRequest) {
        match request {
            ScrollRequest::Top => {
                self.scroll.scroll_to_top();
                self.target = None;
                self.focus = None;
            }
            ScrollRequest::Block(index) => {
                self.target = self
                    .block_offsets
                    .get(index)
                    .map(|y| (*y).min(self.max_offset));
                self.stepped_to = None;
            }
        }
    }

    /// Advances a running smooth scroll by one frame. Returns true while moving.
    pub fn step_scroll(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let current = self.scroll.offset().y;
        // The render clamped the last step: nothing further to scroll.
        if self.stepped_to.is_some_and(|y| y != current) {
            self.target = None;
            self.stepped_to = None;
            return false;
        }
        // The content may have shrunk since the request.
        let target = target.min(self.max_offset);
        let next = smooth_step(current, target);
        self.scroll.set_offset(Position::new(0, next));
        if next == target {
            self.target = None;
            self.stepped_to = None;
        } else {
            self.stepped_to = Some(next);
        }
        true
    }

    pub fn is_scrolling(&self) -> bool {
        self.target.is_some()
    }

    /// True while the bar fill animation is running.
    pub fn is_filling(&self, now: Instant) -> bool {
        self.fill_started
            .is_some_and(|start| now.duration_since(start) < BAR_FILL)
    }

    pub fn focused(&self) -> Option<&Interactive> {
        self.focus.and_then(|i| self.interactives.get(i))
    }

    /// Index into `interactives` of the disclosure whose header is at the
    /// clicked screen cell.
    fn hit_test(&self, col: u16, row: u16) -> Option<usize> {
        if !self.viewport.contains(Position::new(col, row)) {
            return None;
        }
        let y = (row - self.viewport.y).saturating_add(self.scroll.offset().y);
        let (_, block) = self.header_rows.iter().find(|(header_y, _)| *header_y == y)?;
        self.interactives
            .iter()
            .position(|item| *item == Interactive::Disclosure(*block))
    }

    /// Resets per-revision state when new content is shown.
    fn observe(&mut self, rev: u64, fragment: Option<&Fragment>, now: Instant) {
        let bars: Vec<u8> = fragment
            .map(|f| f.bars().map(|b| b.width).collect())
            .unwrap_or_default();

        if self.rendered_rev != Some(rev) {
            self.rendered_rev = Some(rev);
            self.bars_started_empty = !bars.is_empty() && bars.iter().all(|w| *w == 0);
            self.fill_started = None;
            self.focus = None;
        }
        if self.bars_started_empty && self.fill_started.is_none() && bars.iter().any(|w| *w > 0)
        {
            self.fill_started = Some(now);
        }

        self.interactives = fragment.map(Fragment::interactives).unwrap_or_default();
        if self.focus.is_some_and(|i| i >= self.interactives.len()) {
            self.focus = None;
        }
    }

    fn fill_progress(&self, now: Instant) -> f64 {
        match self.fill_started {
            Some(start) => {
                let t = now.duration_since(start).as_secs_f64() / BAR_FILL.as_secs_f64();
                ease_out(t.clamp(0.0, 1.0))
            }
            None => 1.0,
        }
    }
}

impl EventHandler for ContentState {
    /// Emits the focused item when it is activated.
    type Event = Interactive;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Interactive> {
        let count = self.interactives.len();
        match event {
            TuiEvent::ScrollUp => {
                self.target = None;
                self.scroll.scroll_up();
            }
            TuiEvent::ScrollDown => {
                self.target = None;
                self.scroll.scroll_down();
            }
            TuiEvent::ScrollPageUp => {
                self.target = None;
                self.scroll.scroll_page_up();
            }
            TuiEvent::ScrollPageDown => {
                self.target = None;
                self.scroll.scroll_page_down();
            }
            TuiEvent::ScrollTop => self.apply(ScrollRequest::Top),
            TuiEvent::FocusNext if count > 0 => {
                self.focus = Some(self.focus.map_or(0, |i| (i + 1) % count));
            }
            TuiEvent::FocusPrev if count > 0 => {
                self.focus = Some(self.focus.map_or(count - 1, |i| (i + count - 1) % count));
            }
            TuiEvent::Activate => return self.focused().cloned(),
            TuiEvent::MouseClick(col, row) => {
                let index = self.hit_test(*col, *row)?;
                self.focus = Some(index);
                return self.focused().cloned();
            }
            _ => {}
        }
        None
    }
}

/// Moves a third of the remaining distance, at least one row.
fn smooth_step(current: u16, target: u16) -> u16 {
    let distance = current.abs_diff(target);
    let step = (distance / 3).max(1).min(distance);
    if target > current {
        current + step
    } else {
        current - step
    }
}

/// Cubic ease-out.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

struct RenderedBlock<'a> {
    kind: RenderedKind<'a>,
    height: u16,
}

enum RenderedKind<'a> {
    Text(Paragraph<'a>),
    Bar { label: Line<'a>, gauge: LineGauge<'a> },
}

pub struct ContentView<'a> {
    pub fragment: Option<&'a Fragment>,
    pub content_rev: u64,
    pub lang: Lang,
    pub palette: Palette,
    /// Mid-transition: the old content is shown faded.
    pub faded: bool,
    pub now: Instant,
    pub state: &'a mut ContentState,
}

impl ContentView<'_> {
    fn base_style(&self) -> Style {
        let style = Style::default().fg(self.palette.fg);
        if self.faded {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    fn render_block(
        &self,
        index: usize,
        block: &Block,
        width: u16,
        progress: f64,
    ) -> RenderedBlock<'static> {
        match block {
            Block::Markdown(src) => {
                let paragraph = Paragraph::new(markdown::render(src, &self.palette))
                    .style(self.base_style())
                    .wrap(Wrap { trim: false });
                let height = paragraph.line_count(width) as u16;
                RenderedBlock {
                    kind: RenderedKind::Text(paragraph),
                    height,
                }
            }
            Block::Bar(bar) => {
                let ratio = (f64::from(bar.width) / 100.0 * progress).clamp(0.0, 1.0);
                let shown = (ratio * 100.0).round() as u8;
                let label = Line::from(vec![
                    Span::styled(bar.label.clone(), self.base_style().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {shown}%"), Style::default().fg(self.palette.muted)),
                ]);
                let gauge = LineGauge::default()
                    .ratio(ratio)
                    .label("")
                    .filled_style(Style::default().fg(self.palette.bar_filled))
                    .unfilled_style(Style::default().fg(self.palette.bar_empty));
                RenderedBlock {
                    kind: RenderedKind::Bar { label, gauge },
                    height: 3,
                }
            }
            Block::Disclosure(d) => {
                let focused = matches!(self.state.focused(), Some(Interactive::Disclosure(i)) if *i == index);
                let marker = if d.open { "▾ " } else { "▸ " };
                let mut header_style = self.base_style().add_modifier(Modifier::BOLD);
                if focused {
                    header_style = header_style.add_modifier(Modifier::REVERSED);
                }
                let mut text = Text::from(Line::from(vec![
                    Span::styled(marker, Style::default().fg(self.palette.accent)),
                    Span::styled(d.header.clone(), header_style),
                ]));
                if d.open {
                    for line in markdown::render(&d.body, &self.palette).lines {
                        let mut indented = line;
                        indented.spans.insert(0, Span::raw("  "));
                        text.lines.push(indented);
                    }
                }
                text.lines.push(Line::default());
                let paragraph = Paragraph::new(text)
                    .style(self.base_style())
                    .wrap(Wrap { trim: false });
                let height = paragraph.line_count(width) as u16;
                RenderedBlock {
                    kind: RenderedKind::Text(paragraph),
                    height,
                }
            }
        }
    }
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.observe(self.content_rev, self.fragment, self.now);

        let Some(fragment) = self.fragment else {
            let empty = Paragraph::new(t(self.lang, "content.empty"))
                .style(Style::default().fg(self.palette.muted));
            frame.render_widget(empty, area);
            self.state.header_rows.clear();
            return;
        };

        // One column for the scrollbar.
        let width = area.width.saturating_sub(1);
        let progress = self.state.fill_progress(self.now);
        let rendered: Vec<RenderedBlock> = fragment
            .blocks
            .iter()
            .enumerate()
            .map(|(i, block)| self.render_block(i, block, width, progress))
            .collect();

        let mut offsets = Vec::with_capacity(rendered.len());
        let mut y: u16 = 0;
        for block in &rendered {
            offsets.push(y);
            y = y.saturating_add(block.height);
        }
        self.state.header_rows = fragment
            .blocks
            .iter()
            .zip(&offsets)
            .enumerate()
            .filter(|(_, (block, _))| matches!(block, Block::Disclosure(_)))
            .map(|(i, (_, y))| (*y, i))
            .collect();
        self.state.block_offsets = offsets;
        self.state.max_offset = y.saturating_sub(area.height);
        self.state.viewport = area;

        let mut scroll_view = ScrollView::new(Size::new(width, y))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for block in rendered {
            match block.kind {
                RenderedKind::Text(paragraph) => {
                    scroll_view.render_widget(paragraph, Rect::new(0, y, width, block.height));
                }
                RenderedKind::Bar { label, gauge } => {
                    scroll_view.render_widget(Paragraph::new(label), Rect::new(0, y, width, 1));
                    scroll_view.render_widget(gauge, Rect::new(0, y + 1, width, 1));
                }
            }
            y = y.saturating_add(block.height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn smooth_step_converges() {
        assert_eq!(smooth_step(0, 30), 10);
        assert_eq!(smooth_step(28, 30), 29);
        assert_eq!(smooth_step(29, 30), 30);
        assert_eq!(smooth_step(30, 0), 20);
        assert_eq!(smooth_step(5, 5), 5);
    }

    #[test]
    fn ease_out_hits_the_ends() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn fill_clock_starts_when_empty_bars_fill() {
        let now = Instant::now();
        let mut fragment = Fragment::parse("::: bar 80 Rust\n");
        for bar in fragment.bars_mut() {
            bar.width = 0;
        }

        let mut state = ContentState::new();
        state.observe(1, Some(&fragment), now);
        assert!(!state.is_filling(now));

        for bar in fragment.bars_mut() {
            bar.width = 80;
        }
        state.observe(1, Some(&fragment), now);
        assert!(state.is_filling(now));
        assert!(state.fill_progress(now) < 0.01);
        assert!(!state.is_filling(now + BAR_FILL));
    }

    #[test]
    fn bars_shown_full_from_the_start_do_not_animate() {
        let now = Instant::now();
        let fragment = Fragment::parse("::: bar 80 Rust\n");
        let mut state = ContentState::new();
        state.observe(1, Some(&fragment), now);
        assert!(!state.is_filling(now));
        assert_eq!(state.fill_progress(now), 1.0);
    }

    #[test]
    fn focus_cycles_and_activates() {
        let mut fragment = Fragment::parse("::: details A\nx\n:::\n::: details B\ny\n:::\n");
        fragment.disclosures_interactive = true;
        let mut state = ContentState::new();
        state.observe(1, Some(&fragment), Instant::now());

        assert_eq!(state.handle_event(&TuiEvent::Activate), None);
        state.handle_event(&TuiEvent::FocusNext);
        state.handle_event(&TuiEvent::FocusNext);
        assert_eq!(
            state.handle_event(&TuiEvent::Activate),
            Some(Interactive::Disclosure(1))
        );
        state.handle_event(&TuiEvent::FocusNext);
        assert_eq!(state.focused(), Some(&Interactive::Disclosure(0)));
        state.handle_event(&TuiEvent::FocusPrev);
        assert_eq!(state.focused(), Some(&Interactive::Disclosure(1)));
    }

    #[test]
    fn new_revision_clears_focus() {
        let mut fragment = Fragment::parse("::: details A\nx\n:::\n");
        fragment.disclosures_interactive = true;
        let mut state = ContentState::new();
        state.observe(1, Some(&fragment), Instant::now());
        state.handle_event(&TuiEvent::FocusNext);
        assert!(state.focused().is_some());

        state.observe(2, Some(&fragment), Instant::now());
        assert!(state.focused().is_none());
    }

    #[test]
    fn block_request_sets_smooth_target() {
        let mut state = ContentState::new();
        state.block_offsets = vec![0, 12, 40];
        state.max_offset = 100;
        state.apply(ScrollRequest::Block(2));
        assert!(state.step_scroll());
        assert!(state.scroll.offset().y > 0);

        state.apply(ScrollRequest::Top);
        assert_eq!(state.scroll.offset().y, 0);
        assert!(!state.step_scroll());
    }

    fn draw(terminal: &mut Terminal<TestBackend>, fragment: &Fragment, state: &mut ContentState) {
        terminal
            .draw(|f| {
                let area = f.area();
                ContentView {
                    fragment: Some(fragment),
                    content_rev: 1,
                    lang: Lang::En,
                    palette: Palette::for_theme(Theme::Light),
                    faded: false,
                    now: Instant::now(),
                    state,
                }
                .render(f, area);
            })
            .unwrap();
    }

    #[test]
    fn scrolling_to_a_block_in_the_last_screenful_settles() {
        let mut source: String = (0..40).map(|i| format!("Paragraph {i}\n\n")).collect();
        source.push_str("::: details Last\nbody\n:::\n");
        let fragment = Fragment::parse(&source);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = ContentState::new();
        draw(&mut terminal, &fragment, &mut state);
        assert!(state.max_offset > 0);
        assert!(state.block_offsets[1] > state.max_offset);

        state.apply(ScrollRequest::Block(1));
        let mut frames = 0;
        while state.step_scroll() {
            draw(&mut terminal, &fragment, &mut state);
            frames += 1;
            assert!(frames < 100, "smooth scroll did not finish");
        }

        assert!(!state.is_scrolling());
        assert!(state.scroll.offset().y > 0);
        assert!(state.scroll.offset().y <= state.max_offset);
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Last"));
    }

    fn clickable_fragment() -> Fragment {
        let mut fragment = Fragment::parse("# Engagements\n\n::: details Mentoring\nWeekly.\n:::\n");
        fragment.disclosures_interactive = true;
        fragment
    }

    #[test]
    fn clicking_a_disclosure_header_activates_it() {
        let fragment = clickable_fragment();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = ContentState::new();
        draw(&mut terminal, &fragment, &mut state);

        let header_row = state.block_offsets[1];
        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(3, header_row)),
            Some(Interactive::Disclosure(1))
        );
        assert_eq!(state.focused(), Some(&Interactive::Disclosure(1)));
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(3, 0)), None);
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(3, 19)), None);
    }

    #[test]
    fn clicks_follow_the_scroll_offset() {
        let mut source: String = (0..40).map(|i| format!("Paragraph {i}\n\n")).collect();
        source.push_str("::: details Last\nbody\n:::\n");
        let mut fragment = Fragment::parse(&source);
        fragment.disclosures_interactive = true;
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = ContentState::new();
        draw(&mut terminal, &fragment, &mut state);

        state.scroll.set_offset(Position::new(0, state.max_offset));
        draw(&mut terminal, &fragment, &mut state);
        let row = state.block_offsets[1] - state.scroll.offset().y;
        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(0, row)),
            Some(Interactive::Disclosure(1))
        );
    }

    #[test]
    fn headers_are_not_clickable_unless_interactive() {
        let mut fragment = clickable_fragment();
        fragment.disclosures_interactive = false;
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = ContentState::new();
        draw(&mut terminal, &fragment, &mut state);

        let header_row = state.block_offsets[1];
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(3, header_row)), None);
    }
}
