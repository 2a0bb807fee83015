use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use unicode_width::UnicodeWidthStr;

use pacman_engine::{Cell, CollectibleKind, GhostMode, Maze, Snapshot, Tile};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Eyes,
    Wall,
    Tunnel,
    Empty,
    Dot,
    Pellet,
}

impl Glyph {
    fn text(self) -> &'static str {
        match self {
            Glyph::Player => "😃",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Eyes => "👀",
            Glyph::Wall => "██",
            Glyph::Tunnel => "░░",
            Glyph::Empty => "",
            Glyph::Dot => "·",
            Glyph::Pellet => "●",
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
struct Sprite {
    glyph: Glyph,
    color: Color,
}

/// Diffing terminal renderer: only cells that changed since the last frame
/// are redrawn.
pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Sprite>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(maze: &Maze) -> Self {
        let width = maze.width() as usize;
        let height = maze.height() as usize;
        Self {
            width,
            height,
            last: vec![
                Sprite {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Top-left corner of the board when the terminal can hold it, with
    /// one row above for the HUD.
    fn board_origin(&self) -> io::Result<Result<(u16, u16), (u16, u16)>> {
        let (cols, rows) = terminal::size()?;
        let need_cols = (self.width * CELL_W) as u16;
        let need_rows = self.height as u16 + 2;
        if cols < need_cols || rows < need_rows {
            return Ok(Err((cols, rows)));
        }
        Ok(Ok(((cols - need_cols) / 2, (rows - need_rows) / 2 + 1)))
    }

    pub fn render(
        &mut self,
        stdout: &mut Stdout,
        maze: &Maze,
        snapshot: &Snapshot,
        paused: bool,
    ) -> io::Result<()> {
        let origin = match self.board_origin()? {
            Ok(origin) => origin,
            Err((cols, rows)) => {
                self.needs_full = true;
                queue!(
                    stdout,
                    Clear(ClearType::All),
                    MoveTo(0, 0),
                    Print(format!(
                        "Board needs {}x{}, terminal is {cols}x{rows}. Resize or press q.",
                        self.width * CELL_W,
                        self.height + 2,
                    ))
                )?;
                return stdout.flush();
            }
        };
        if origin != (self.origin_x, self.origin_y) {
            (self.origin_x, self.origin_y) = origin;
            self.needs_full = true;
        }

        let hud = hud_line(snapshot, paused);
        if self.needs_full || hud != self.last_hud {
            queue!(
                stdout,
                MoveTo(self.origin_x, self.origin_y - 1),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::White),
                Print(&hud),
                ResetColor
            )?;
            self.last_hud = hud;
        }

        let collectibles = snapshot.collectible_map();
        let cells = (0..self.height).flat_map(|y| (0..self.width).map(move |x| (x, y)));
        for (idx, (x, y)) in cells.enumerate() {
            let cell = Cell::new(x as i32, y as i32);
            let sprite = sprite_for(maze, snapshot, cell, collectibles.get(&cell).copied());
            if !self.needs_full && sprite == self.last[idx] {
                continue;
            }
            self.last[idx] = sprite;
            self.put(stdout, x, y, sprite)?;
        }
        self.needs_full = false;
        stdout.flush()
    }

    fn put(&self, stdout: &mut Stdout, x: usize, y: usize, sprite: Sprite) -> io::Result<()> {
        let text = sprite.glyph.text();
        let pad = CELL_W.saturating_sub(text.width());
        queue!(
            stdout,
            MoveTo(
                self.origin_x + (x * CELL_W) as u16,
                self.origin_y + y as u16,
            ),
            SetForegroundColor(sprite.color),
            Print(format!("{text}{:pad$}", "")),
            ResetColor
        )
    }

    /// Writes the end-of-game summary on the line below the board, or at
    /// the top left when the board did not fit.
    pub fn show_final_score(&self, stdout: &mut Stdout, snapshot: &Snapshot) -> io::Result<()> {
        let (x, y) = match self.board_origin()? {
            Ok((x, y)) => (x, y + self.height as u16),
            Err(_) => (0, 1),
        };
        queue!(
            stdout,
            MoveTo(x, y),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Game over on level {} with {} points. Press q to leave.",
                snapshot.level, snapshot.score
            )),
            ResetColor
        )?;
        stdout.flush()
    }
}

fn hud_line(snapshot: &Snapshot, paused: bool) -> String {
    let mut hud = format!(
        "Score {:>6} | Lives {} | Level {} | Left {:>3}",
        snapshot.score,
        snapshot.lives,
        snapshot.level,
        snapshot.collectibles.len(),
    );
    if snapshot.frightened_remaining > 0 {
        hud.push_str(&format!(" | Power {:>3}", snapshot.frightened_remaining));
    }
    hud.push_str(if paused { " | PAUSED" } else { " | p pause, q quit" });
    hud
}

fn sprite_for(
    maze: &Maze,
    snapshot: &Snapshot,
    cell: Cell,
    collectible: Option<CollectibleKind>,
) -> Sprite {
    if snapshot.player.cell == cell {
        return Sprite {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snapshot.ghost_at(cell) {
        return match ghost.mode {
            GhostMode::Frightened => Sprite {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            GhostMode::Eaten => Sprite {
                glyph: Glyph::Eyes,
                color: Color::White,
            },
            GhostMode::Scatter | GhostMode::Chase => Sprite {
                glyph: Glyph::Ghost,
                color: Color::Red,
            },
        };
    }
    match collectible {
        Some(CollectibleKind::Dot) => {
            return Sprite {
                glyph: Glyph::Dot,
                color: Color::White,
            }
        }
        Some(CollectibleKind::PowerPellet) => {
            return Sprite {
                glyph: Glyph::Pellet,
                color: Color::Magenta,
            }
        }
        None => {}
    }
    match maze.tile(cell) {
        Some(Tile::Wall) | None => Sprite {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Some(Tile::TunnelEdge) => Sprite {
            glyph: Glyph::Tunnel,
            color: Color::DarkGrey,
        },
        Some(Tile::Path) => Sprite {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacman_engine::{Game, GameConfig, Layout};

    #[test]
    fn hud_shows_power_only_while_frightened() {
        let game = Game::new(&Layout::classic(), GameConfig::default()).unwrap();
        let mut snapshot = game.snapshot();

        let hud = hud_line(&snapshot, false);
        assert!(hud.starts_with("Score      0 | Lives 3 | Level 1"));
        assert!(!hud.contains("Power"));
        assert!(hud.ends_with("p pause, q quit"));

        snapshot.frightened_remaining = 42;
        let hud = hud_line(&snapshot, true);
        assert!(hud.contains("| Power  42 |"));
        assert!(hud.ends_with("| PAUSED"));
    }

    #[test]
    fn glyphs_fit_two_columns() {
        let glyphs = [
            Glyph::Player,
            Glyph::Ghost,
            Glyph::Frightened,
            Glyph::Eyes,
            Glyph::Wall,
            Glyph::Tunnel,
            Glyph::Empty,
            Glyph::Dot,
            Glyph::Pellet,
        ];
        for glyph in glyphs {
            assert!(glyph.text().width() <= CELL_W);
        }
    }
}
