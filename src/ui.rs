use std::io::{stdout, Result, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use amaze_puzzle::{Area, MazeError, Outcome, Session, STORAGE_SLOTS};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Stylize};
use crossterm::{cursor, queue, style, terminal};
use itertools::Itertools;

use crate::options::{IconSet, Theme};
use crate::Args;

const TICK: Duration = Duration::from_secs(1);
const FLASH: Duration = Duration::from_millis(500);
const CELL_WIDTH: u16 = 6;
const GAP: u16 = 2;
const COLUMNS: usize = 6;
const ROWS: usize = 8;
const GRID_TOP: u16 = 2;

// Storage 0..8 runs down the left column and 8..16 down the right; the 4x4 field sits in the
// middle four columns, rows 2..6.
fn slot_at(col: usize, row: usize) -> Option<usize> {
    match col {
        0 => Some(row),
        5 => Some(STORAGE_SLOTS / 2 + row),
        1..=4 if (2..6).contains(&row) => Some(Area::Field.slot((row - 2) * 4 + col - 1)),
        _ => None,
    }
}

fn column_x(col: usize) -> u16 {
    let col = col as u16;
    match col {
        0 => 0,
        1..=4 => CELL_WIDTH + GAP + (col - 1) * CELL_WIDTH,
        _ => CELL_WIDTH + GAP + 4 * CELL_WIDTH + GAP,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Quit,
    Load(LoadSource),
    Overwrite { then_quit: bool },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LoadSource {
    Maze,
    Save,
}

struct Screen {
    session: Session,
    theme: Theme,
    icons: IconSet,
    cursor: (usize, usize),
    prompt: Option<Prompt>,
    flash: Option<(usize, usize, Instant)>,
    message: String,
    maze_path: PathBuf,
    save_path: PathBuf,
}

impl Screen {
    fn draw(&self) -> Result<()> {
        let mut out = stdout();
        queue!(out, style::ResetColor, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

        let state = if self.session.is_blank() {
            "no maze loaded"
        } else if self.session.is_won() {
            "solved"
        } else if self.session.is_saved() {
            "saved"
        } else {
            ""
        };
        queue!(out, style::PrintStyledContent(format!("aMaze  {}  {}", self.session.formatted_time(), state).with(self.theme.status)))?;

        for (row, col) in (0..ROWS).cartesian_product(0..COLUMNS) {
            if let Some(slot) = slot_at(col, row) {
                self.draw_slot(slot, column_x(col), GRID_TOP + row as u16, (col, row) == self.cursor)?;
            }
        }

        let help = match self.prompt {
            Some(Prompt::Quit) => "unsaved changes: [s]ave and quit, [q]uit anyway, [esc] keep playing",
            Some(Prompt::Load(_)) => "unsaved changes: [y] load anyway, [esc] cancel",
            Some(Prompt::Overwrite { .. }) => "a save file is already there: [y] overwrite it, [esc] cancel",
            None => "arrows move  space pick/drop  r rotate  u reset  s save  n new  o open  q quit",
        };
        queue!(
            out,
            style::ResetColor,
            cursor::MoveTo(0, GRID_TOP + ROWS as u16 + 1),
            style::PrintStyledContent(self.message.as_str().with(self.theme.status)),
            cursor::MoveTo(0, GRID_TOP + ROWS as u16 + 2),
            style::Print(help),
        )?;
        out.flush()
    }

    fn draw_slot(&self, slot: usize, x: u16, y: u16, under_cursor: bool) -> Result<()> {
        let tile = self.session.puzzle().slot(slot);
        let flashing = self.flash.is_some_and(|(a, b, _)| slot == a || slot == b);
        let bg = if flashing {
            self.theme.bg_illegal
        } else if self.session.selected() == Some(slot) {
            self.theme.bg_selected
        } else if tile.occupied() {
            self.theme.bg_piece
        } else {
            self.theme.bg_empty
        };
        let (area, index) = Area::of(slot);
        let home_here = area == Area::Field && tile.home_id() == index as i32 && tile.orientation() == 0;
        let fg: Color = if home_here { self.theme.placed } else { self.theme.text };

        let text = match tile.piece() {
            Some(piece) => format!(" {:>2} {} ", piece.home(), self.icons.arrows[piece.orientation() as usize]),
            None => format!("  {}{}  ", self.icons.empty, self.icons.empty),
        };
        let mut content = text.with(fg).on(bg);
        if under_cursor {
            content = content.attribute(Attribute::Reverse);
        }
        queue!(stdout(), cursor::MoveTo(x, y), style::PrintStyledContent(content))?;
        Ok(())
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let (mut col, mut row) = (self.cursor.0 as isize, self.cursor.1 as isize);
        loop {
            col += dx;
            row += dy;
            if !(0..COLUMNS as isize).contains(&col) || !(0..ROWS as isize).contains(&row) {
                return;
            }
            if slot_at(col as usize, row as usize).is_some() {
                self.cursor = (col as usize, row as usize);
                return;
            }
        }
    }

    fn cursor_slot(&self) -> Option<usize> {
        slot_at(self.cursor.0, self.cursor.1)
    }

    fn pick(&mut self) {
        let Some(slot) = self.cursor_slot() else { return };
        match self.session.click(slot) {
            Outcome::Illegal { selected, clicked } => {
                self.flash = Some((selected, clicked, Instant::now()));
            },
            Outcome::Moved { .. } => self.announce_win(),
            _ => {},
        }
    }

    fn rotate(&mut self) {
        let Some(slot) = self.cursor_slot() else { return };
        if let Outcome::Rotated(_) = self.session.rotate(slot) {
            self.announce_win();
        }
    }

    fn announce_win(&mut self) {
        if self.session.is_won() {
            self.message = format!("You have won! Time: {}", self.session.formatted_time());
        }
    }

    fn save(&mut self) -> bool {
        match self.session.save_path(&self.save_path) {
            Ok(true) => {
                self.message = format!("saved to {}", self.save_path.display());
                true
            },
            Ok(false) => {
                self.message = "Nothing to save!".into();
                false
            },
            Err(e) => {
                self.message = format!("save failed: {e}");
                false
            },
        }
    }

    fn request_save(&mut self, then_quit: bool) -> bool {
        if !self.session.is_blank() && self.session.would_overwrite(&self.save_path) {
            self.session.pause();
            self.prompt = Some(Prompt::Overwrite { then_quit });
            return false;
        }
        self.save()
    }

    fn request_load(&mut self, source: LoadSource) {
        if self.session.needs_save_prompt() {
            self.session.pause();
            self.prompt = Some(Prompt::Load(source));
        } else {
            self.load(source);
        }
    }

    fn load(&mut self, source: LoadSource) {
        let path = match source {
            LoadSource::Maze => self.maze_path.clone(),
            LoadSource::Save => self.save_path.clone(),
        };
        self.message = match self.session.load_path(&path) {
            Ok(_) => format!("loaded {}", path.display()),
            Err(e @ MazeError::InvalidFormat(_)) => {
                self.session.make_blank();
                format!("File format is not correct! ({e})")
            },
            Err(e) => {
                self.session.resume();
                e.to_string()
            },
        };
    }

    // true to leave the game
    fn key(&mut self, event: KeyEvent) -> bool {
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if let Some(prompt) = self.prompt {
            match (prompt, event.code) {
                (Prompt::Quit, KeyCode::Char('q')) => return true,
                (Prompt::Quit, KeyCode::Char('s')) => {
                    self.prompt = None;
                    if self.request_save(true) { return true }
                    if self.prompt.is_none() {
                        self.session.resume();
                    }
                    return false;
                },
                (Prompt::Load(source), KeyCode::Char('y')) => self.load(source),
                (Prompt::Overwrite { then_quit }, KeyCode::Char('y')) => {
                    if self.save() && then_quit { return true }
                    self.session.resume();
                },
                (_, KeyCode::Esc) => self.session.resume(),
                _ => return false,
            }
            self.prompt = None;
            return false;
        }

        self.message.clear();
        match event.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.pick(),
            KeyCode::Char('r') => self.rotate(),
            KeyCode::Char('u') => {
                if self.session.reset() {
                    self.message = "reset".into();
                }
            },
            KeyCode::Char('s') => {
                self.request_save(false);
            },
            KeyCode::Char('n') => self.request_load(LoadSource::Maze),
            KeyCode::Char('o') => self.request_load(LoadSource::Save),
            KeyCode::Esc if self.session.selected().is_some() => {
                self.session.deselect();
            },
            KeyCode::Char('q') | KeyCode::Esc => {
                if !self.session.needs_save_prompt() {
                    return true;
                }
                self.session.pause();
                self.prompt = Some(Prompt::Quit);
            },
            _ => {},
        }
        false
    }
}

pub fn game_loop(args: Args, maze_path: PathBuf, save_path: PathBuf) -> Result<()> {
    let mut screen = Screen {
        session: Session::new(args.seed),
        theme: args.theme.theme(),
        icons: args.iconset.iconset(),
        cursor: (0, 0),
        prompt: None,
        flash: None,
        message: String::new(),
        maze_path,
        save_path,
    };
    screen.load(LoadSource::Maze);

    terminal::enable_raw_mode()?;
    queue!(stdout(), terminal::EnterAlternateScreen, terminal::DisableLineWrap, cursor::Hide)?;

    let result = run(&mut screen);

    queue!(stdout(), style::ResetColor, cursor::Show, terminal::EnableLineWrap, terminal::LeaveAlternateScreen)?;
    stdout().flush()?;
    terminal::disable_raw_mode()?;
    result
}

fn run(screen: &mut Screen) -> Result<()> {
    let mut next_tick = Instant::now() + TICK;
    loop {
        screen.draw()?;

        let mut wake = next_tick;
        if let Some((_, _, since)) = screen.flash {
            wake = wake.min(since + FLASH);
        }
        if poll(wake.saturating_duration_since(Instant::now()))? {
            match read()? {
                Event::Key(event) if event.kind == KeyEventKind::Press => {
                    if screen.key(event) {
                        return Ok(());
                    }
                },
                _ => {},
            }
        }

        let now = Instant::now();
        if screen.flash.is_some_and(|(_, _, since)| now >= since + FLASH) {
            screen.flash = None;
        }
        while now >= next_tick {
            screen.session.tick();
            next_tick += TICK;
        }
    }
}
