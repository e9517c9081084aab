/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into the `front` buffer (grid of Cell)
///   2. Compare each cell with the `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The 48 x 14 play field is drawn with two terminal columns per field
/// cell, centred horizontally, below the header and progress dots.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::finale::{Finale, FinalePhase};
use crate::domain::geometry::{Point, Rect, FIELD_H, FIELD_W};
use crate::domain::scene::{self, Dot, RevealCard, Scene};
use crate::games::emoji_rain::{self, EmojiRain};
use crate::games::ghost_button::GhostButton;
use crate::games::heart_pop::HeartPop;
use crate::games::keyhole::Keyhole;
use crate::games::love_slider::{self, LoveSlider};
use crate::games::password::{self, Password};
use crate::games::pattern_match::{Icon, PatternMatch};
use crate::games::puzzle::Puzzle;
use crate::games::scratch_off::{ScratchOff, MASK_H, MASK_W};
use crate::games::{MiniGame, Stage};
use crate::sim::world::WorldState;

// ── Palette ──

const BASE_BG: Color = Color::Rgb { r: 30, g: 18, b: 28 };
const FIELD_BG: Color = Color::Rgb { r: 44, g: 24, b: 40 };
const ROSE: Color = Color::Rgb { r: 255, g: 95, b: 135 };
const PINK: Color = Color::Rgb { r: 255, g: 170, b: 200 };
const GOLD: Color = Color::Rgb { r: 255, g: 210, b: 90 };
const MINT: Color = Color::Rgb { r: 110, g: 230, b: 150 };
const ALERT: Color = Color::Rgb { r: 255, g: 70, b: 70 };
const MUTED: Color = Color::Rgb { r: 140, g: 110, b: 130 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 120, b: 150 };
const POINTER_BG: Color = Color::Rgb { r: 255, g: 240, b: 120 };

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: BASE_BG };

    /// Sentinel used to invalidate the back buffer so every cell is diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn put_centered(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let x = self.width.saturating_sub(s.chars().count()) / 2;
        self.put_str(x, y, s, fg, bg);
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }
}

// ── Layout ──

/// Terminal columns per field cell.
const CELL_W: usize = 2;

const HEADER_ROW: usize = 0;
const DOTS_ROW: usize = 1;
const FIELD_ROW: usize = 3;
const STATUS_ROW: usize = FIELD_ROW + FIELD_H as usize + 1;
const MSG_ROW: usize = STATUS_ROW + 1;
const HELP_ROW: usize = MSG_ROW + 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_scene: Option<Scene>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_scene: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(Cell::INVALID);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }

        // Scene change → clear for a clean transition
        let scene = world.scene();
        if self.last_scene != Some(scene) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
            self.last_scene = Some(scene);
        }

        self.front.clear();

        if scene::shows_chrome(world.progress.current_level()) {
            self.compose_chrome(world);
        }
        match scene {
            Scene::Welcome => self.compose_welcome(world),
            Scene::Level(_) => self.compose_level(world),
            Scene::Reveal(_) => {
                if let Some(card) = world.reveal() {
                    self.compose_reveal(&card);
                }
            }
            Scene::Finale => {
                if let Some(finale) = &world.finale {
                    self.compose_finale(world, finale);
                }
            }
        }
        self.compose_message(world);
        self.compose_help(world, scene);

        if world.paused {
            self.compose_pause_overlay(world);
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = BASE_BG;
        let mut need_move = true;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }
                if need_move {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
            }
            need_move = true;
        }

        self.writer.flush()
    }

    // ── Field helpers (field cell → terminal columns) ──

    fn field_x(&self) -> usize {
        self.front.width.saturating_sub(FIELD_W as usize * CELL_W) / 2
    }

    fn to_screen(&self, p: Point) -> (usize, usize) {
        (self.field_x() + p.x.max(0) as usize * CELL_W, FIELD_ROW + p.y.max(0) as usize)
    }

    fn field_text(&mut self, p: Point, s: &str, fg: Color, bg: Color) {
        let (x, y) = self.to_screen(p);
        self.front.put_str(x, y, s, fg, bg);
    }

    /// Text centred on field row `y`.
    fn field_line(&mut self, y: i32, s: &str, fg: Color) {
        let width = FIELD_W as usize * CELL_W;
        let x = self.field_x() + width.saturating_sub(s.chars().count()) / 2;
        self.front.put_str(x, FIELD_ROW + y.max(0) as usize, s, fg, FIELD_BG);
    }

    fn field_fill(&mut self, r: Rect, ch: char, fg: Color, bg: Color) {
        for y in r.y..r.y + r.h {
            for x in r.x..r.x + r.w {
                let (sx, sy) = self.to_screen(Point::new(x, y));
                self.front.set(sx, sy, Cell::new(ch, fg, bg));
                self.front.set(sx + 1, sy, Cell::new(ch, fg, bg));
            }
        }
    }

    /// Fill `r` and centre `label` on its middle row.
    fn field_button(&mut self, r: Rect, label: &str, fg: Color, bg: Color) {
        self.field_fill(r, ' ', fg, bg);
        let (sx, sy) = self.to_screen(r.origin());
        let width = r.w.max(0) as usize * CELL_W;
        let x = sx + width.saturating_sub(label.chars().count()) / 2;
        self.front.put_str(x, sy + (r.h.max(1) as usize - 1) / 2, label, fg, bg);
    }

    fn compose_field(&mut self) {
        self.field_fill(Rect::new(0, 0, FIELD_W, FIELD_H), ' ', Color::White, FIELD_BG);
    }

    fn compose_pointer(&mut self, p: Point) {
        let (x, y) = self.to_screen(p);
        for dx in 0..CELL_W {
            let mut cell = self.front.get(x + dx, y);
            cell.bg = POINTER_BG;
            cell.fg = Color::Black;
            self.front.set(x + dx, y, cell);
        }
    }

    fn status(&mut self, s: &str, fg: Color) {
        self.front.put_centered(STATUS_ROW, s, fg, BASE_BG);
    }

    // ── Chrome ──

    fn compose_chrome(&mut self, w: &WorldState) {
        let level = w.progress.current_level();
        let title = level.title().unwrap_or("");
        let header = format!(" Level {level}  {title} ");
        self.front.fill_row(HEADER_ROW, ROSE);
        self.front.put_centered(HEADER_ROW, &header, Color::White, ROSE);

        let dots: String = scene::progress_dots(level)
            .iter()
            .map(|d| match d {
                Dot::Done => '♥',
                Dot::Current => '●',
                Dot::Pending => '○',
            })
            .flat_map(|c| [c, ' '])
            .collect();
        self.front.put_centered(DOTS_ROW, dots.trim_end(), PINK, BASE_BG);
    }

    fn compose_message(&mut self, w: &WorldState) {
        if w.message.is_empty() || MSG_ROW >= self.front.height {
            return;
        }
        self.front.fill_row(MSG_ROW, MSG_BG);
        self.front.put_centered(MSG_ROW, &format!(" ♥ {} ", w.message), Color::Black, MSG_BG);
    }

    fn compose_help(&mut self, w: &WorldState, scene: Scene) {
        let help = match scene {
            Scene::Welcome => " ENTER: Begin   Q/ESC: Quit",
            Scene::Reveal(_) => " ENTER/SPACE: Continue   F1: Pause",
            Scene::Level(_) if w.wants_text() => " Type your answer   ENTER: Submit   BKSP: Erase   F1: Pause",
            Scene::Level(_) => " ←→↑↓/WASD: Move   SPACE/ENTER: Press   R: Restart   F1: Pause",
            Scene::Finale => match w.finale.as_ref().map(Finale::phase) {
                Some(FinalePhase::Accepted) => " Q/ESC: Quit",
                _ => " ←→↑↓/WASD: Move   SPACE/ENTER: Press   F1: Pause",
            },
        };
        if HELP_ROW < self.front.height {
            self.front.put_str(0, HELP_ROW, help, MUTED, BASE_BG);
        }
    }

    // ── Welcome ──

    fn compose_welcome(&mut self, w: &WorldState) {
        let art = [
            r"  __   __    _         _   _            ",
            r"  \ \ / /_ _| |___ _ _| |_(_)_ _  ___   ",
            r"   \ V / _` | / -_) ' \  _| | ' \/ -_)  ",
            r"    \_/\__,_|_\___|_||_\__|_|_||_\___|  ",
        ];
        for (i, line) in art.iter().enumerate() {
            self.front.put_centered(2 + i, line, ROSE, BASE_BG);
        }
        self.front.put_centered(8, &format!("Hey {},", w.nickname), GOLD, BASE_BG);
        self.front.put_centered(10, "I made something special just for you. But first,", Color::White, BASE_BG);
        self.front.put_centered(11, "you'll have to prove you're worthy of the surprise!", Color::White, BASE_BG);
        self.front.put_centered(13, "9 levels stand between you and the final question...", MUTED, BASE_BG);

        let blink = (w.anim_tick / 15) % 2 == 0;
        let fg = if blink { Color::Black } else { Color::White };
        self.front.put_centered(16, "  ▸ ENTER  Begin the Adventure  ", fg, PINK);
    }

    // ── Levels ──

    fn compose_level(&mut self, w: &WorldState) {
        let Some(stage) = &w.stage else { return };
        self.compose_field();
        match stage {
            Stage::GhostButton(g) => self.compose_ghost(g),
            Stage::HeartPop(g) => self.compose_hearts(g),
            Stage::LoveSlider(g) => self.compose_slider(g),
            Stage::ScratchOff(g) => self.compose_scratch(g),
            Stage::Password(g) => self.compose_password(g, w.anim_tick),
            Stage::PatternMatch(g) => self.compose_pattern(g),
            Stage::EmojiRain(g) => self.compose_rain(g),
            Stage::Keyhole(g) => self.compose_keyhole(g),
            Stage::Puzzle(g) => self.compose_puzzle(g),
        }
        if !stage.game().accepts_text() {
            self.compose_pointer(w.pointer);
        }
    }

    fn compose_ghost(&mut self, g: &GhostButton) {
        let bg = if g.is_caught() { MINT } else { ROSE };
        self.field_button(g.button(), g.label(), Color::Black, bg);
        self.status(g.tease(), PINK);
    }

    fn compose_hearts(&mut self, g: &HeartPop) {
        for heart in g.hearts().iter().filter(|h| !h.popped) {
            self.field_text(heart.at, "♥", ROSE, FIELD_BG);
        }
        let total = g.hearts().len();
        let status = format!("Hearts popped: {}/{}   Time left: {}s", g.popped(), total, g.seconds_left());
        let fg = if g.seconds_left() <= 3 { ALERT } else { Color::White };
        self.status(&status, fg);

        if g.is_over() {
            let r = Rect::centered_on(Point::center(), 20, 3);
            self.field_fill(r, ' ', Color::White, ALERT);
            self.field_line(r.y + 1, "Time's up!  Press R to try again", Color::White);
        } else if g.is_won() {
            self.field_line(FIELD_H / 2, "All hearts popped!", MINT);
        }
    }

    fn compose_slider(&mut self, g: &LoveSlider) {
        let track = Rect::new(4, FIELD_H / 2, FIELD_W - 8, 1);
        self.field_fill(track, '─', MUTED, FIELD_BG);
        let filled = track.w * g.value() as i32 / love_slider::MAX as i32;
        self.field_fill(Rect::new(track.x, track.y, filled, 1), '█', ROSE, FIELD_BG);
        let knob = Point::new((track.x + filled).min(track.x + track.w - 1), track.y);
        self.field_text(knob, "♥ ", GOLD, FIELD_BG);

        self.field_line(track.y - 3, &format!("How much do you love me?  {}%", g.value()), Color::White);
        self.field_line(track.y + 3, g.message(), PINK);
        self.status("←/→ to slide", MUTED);
    }

    fn compose_scratch(&mut self, g: &ScratchOff) {
        let area = ScratchOff::area();
        self.field_line(area.y + area.h / 2 - 1, "You make every day", GOLD);
        self.field_line(area.y + area.h / 2, "brighter ♥", GOLD);
        for row in 0..MASK_H {
            for col in 0..MASK_W {
                if g.is_covered(col, row) {
                    let p = Point::new(area.x + col, area.y + row);
                    self.field_text(p, "░░", MUTED, Color::Rgb { r: 90, g: 90, b: 100 });
                }
            }
        }
        let stroke = if g.is_scratching() { "scratching, SPACE to lift" } else { "SPACE to start scratching" };
        self.status(&format!("Scratched: {}%   {}", g.percent(), stroke), Color::White);
    }

    fn compose_password(&mut self, g: &Password, anim_tick: u32) {
        self.field_line(2, password::PROMPT, GOLD);

        let shake = if g.is_shaking() && anim_tick % 2 == 0 { 1 } else { 0 };
        let boxr = Rect::new(8 + shake, 5, FIELD_W - 16, 3);
        self.field_fill(boxr, ' ', Color::White, Color::Rgb { r: 60, g: 40, b: 60 });
        let (text, fg) = if g.input().is_empty() {
            (password::PLACEHOLDER.to_string(), MUTED)
        } else {
            (format!("{}▌", g.input()), Color::White)
        };
        let (x, y) = self.to_screen(Point::new(boxr.x + 1, boxr.y + 1));
        self.front.put_str(x, y, &text, fg, Color::Rgb { r: 60, g: 40, b: 60 });

        if let Some(hint) = g.hint() {
            self.field_line(10, &format!("Hint: {hint}"), PINK);
        }
        if g.is_won() {
            self.field_line(12, "Correct!", MINT);
        }
        let status = format!("Attempts: {}", g.attempts());
        self.status(&status, if g.is_shaking() { ALERT } else { Color::White });
    }

    fn compose_pattern(&mut self, g: &PatternMatch) {
        let bg_error = g.is_error();
        for icon in Icon::ALL {
            let picked = g.selected().contains(&icon);
            let bg = if bg_error {
                ALERT
            } else if picked {
                MINT
            } else {
                Color::Rgb { r: 70, g: 45, b: 70 }
            };
            let label = format!("{} {}", icon.glyph(), icon.label());
            self.field_button(icon.cell(), &label, Color::White, bg);
        }
        let target: Vec<String> = g.pattern().iter().map(|i| i.glyph().to_string()).collect();
        let status = format!("Repeat: {}   ({}/{})", target.join(" "), g.selected().len(), g.pattern().len());
        self.status(&status, if bg_error { ALERT } else { Color::White });
    }

    fn compose_rain(&mut self, g: &EmojiRain) {
        for (item, at) in g.falling() {
            let fg = if item.special { GOLD } else { PINK };
            let glyph = rain_glyph(item.label()).to_string();
            self.field_text(at, &glyph, fg, FIELD_BG);
        }
        let status = format!("Find the {}!   Misses: {}/{}", emoji_rain::SPECIAL, g.misses(), g.miss_limit());
        self.status(&status, Color::White);
        if g.is_failed() {
            let r = Rect::centered_on(Point::center(), 22, 3);
            self.field_fill(r, ' ', Color::White, ALERT);
            self.field_line(r.y + 1, "It got away!  Press R to try again", Color::White);
        } else if g.is_won() {
            self.field_line(FIELD_H / 2, "You found it!", MINT);
        }
    }

    fn compose_keyhole(&mut self, g: &Keyhole) {
        for (i, &card) in g.cards().iter().enumerate() {
            if !g.is_flipped(i) {
                self.field_fill(card, '▒', ROSE, Color::Rgb { r: 90, g: 40, b: 70 });
            } else if i == g.key_card() {
                self.field_button(card, "KEY", Color::Black, GOLD);
            } else {
                self.field_button(card, "·", MUTED, Color::Rgb { r: 60, g: 50, b: 60 });
            }
        }
        self.status(&g.status(), Color::White);
    }

    fn compose_puzzle(&mut self, g: &Puzzle) {
        for (i, rot) in g.rotations().iter().enumerate() {
            let tile = Puzzle::tile(i);
            let arrow = match rot {
                0 => '▲',
                90 => '▶',
                180 => '▼',
                _ => '◀',
            };
            let bg = if *rot == 0 { MINT } else { Color::Rgb { r: 80, g: 50, b: 80 } };
            self.field_button(tile, &format!("{} {}", i + 1, arrow), Color::White, bg);
        }
        let status = if g.is_solved() {
            format!("Solved in {} moves!", g.moves())
        } else {
            format!("Rotate every tile upright ▲   Moves: {}", g.moves())
        };
        self.status(&status, Color::White);
    }

    // ── Reveal ──

    fn compose_reveal(&mut self, card: &RevealCard<'_>) {
        self.compose_field();
        self.field_line(1, &format!("Level {} Complete!", card.level), GOLD);

        let frame = Rect::new(10, 3, FIELD_W - 20, 5);
        if let Some(path) = card.image {
            self.field_fill(frame, ' ', Color::White, Color::Rgb { r: 70, g: 50, b: 70 });
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            self.field_line(frame.y + 1, "┌ photo ┐", PINK);
            self.field_line(frame.y + 2, &name, Color::White);
        }
        if let Some(message) = card.message {
            self.field_line(10, message, PINK);
        }
        self.field_line(12, &format!("▸ {}", card.continue_label), MINT);
    }

    // ── Finale ──

    fn compose_finale(&mut self, w: &WorldState, finale: &Finale) {
        self.compose_field();
        match finale.phase() {
            FinalePhase::Error => {
                let r = Rect::new(6, 2, FIELD_W - 12, 9);
                self.field_fill(r, ' ', Color::White, Color::Rgb { r: 120, g: 20, b: 30 });
                self.field_line(3, "⚠  SYSTEM ERROR  ⚠", Color::White);
                self.field_line(5, "Warning: Love levels exceeding maximum capacity!", Color::White);
                self.field_line(7, "Error Code: LOVE_OVERFLOW_4EVER", GOLD);
                self.field_line(9, "▸ ENTER  Fix the problem", MINT);
            }
            FinalePhase::Question => {
                self.field_line(2, &format!("{}, will you be my Valentine?", w.full_name), GOLD);
                self.field_button(finale.accept_rect(), "Yes!", Color::Black, MINT);
                self.field_button(finale.decline_rect(), finale.decline_label(), Color::White, MUTED);
                self.compose_pointer(w.pointer);
            }
            FinalePhase::Accepted => {
                self.field_line(3, "♥  ♥  ♥", ROSE);
                self.field_line(5, "I knew you'd say yes!", GOLD);
                self.field_line(7, &format!("You just made me the happiest person alive. I love you {}.", w.pet_name), PINK);
                self.field_line(8, "Happy Valentine's Day!", PINK);
                self.field_line(11, "Forever and always yours", MUTED);
            }
        }
    }

    // ── Pause ──

    fn compose_pause_overlay(&mut self, w: &WorldState) {
        let dim = Color::Rgb { r: 40, g: 40, b: 40 };
        let blink = (w.anim_tick / 8) % 2 == 0;
        let box_w = 30_usize.min(self.front.width);
        let box_h = 7_usize;
        let box_x = self.front.width.saturating_sub(box_w) / 2;
        let box_y = FIELD_ROW + (FIELD_H as usize).saturating_sub(box_h) / 2;

        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Cell::new(' ', Color::White, dim));
            }
        }
        let label = if blink { "▶  PAUSED  ◀" } else { "   PAUSED   " };
        self.front.put_str(box_x + box_w.saturating_sub(12) / 2, box_y + 1, label, GOLD, dim);
        self.front.put_str(box_x + 3, box_y + 3, "F1   Resume", Color::White, dim);
        self.front.put_str(box_x + 3, box_y + 4, "ESC  Quit", Color::White, dim);
    }
}

/// Single-width stand-in for each falling item.
fn rain_glyph(label: &str) -> char {
    match label {
        "star" => '*',
        "sparkle" => '✦',
        "cloud" => '☁',
        "sun" => '☀',
        "drop" => '◦',
        "leaf" => '♣',
        "flame" => '♨',
        "snow" => '❄',
        "bell" => '♫',
        "gem" => '◇',
        "crown" => '♛',
        "bolt" => 'ϟ',
        "wave" => '~',
        "shell" => '@',
        "fish" => '≈',
        "bird" => 'v',
        _ => 'Ж',
    }
}
