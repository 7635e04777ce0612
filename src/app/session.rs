//! An interactive session over a roster, one command per line.
//!
//! The session plays the role of the browser application: it owns the roster,
//! the lottery and the latest groups, and serializes every operation.

use std::io::BufRead;
use std::time::{Duration, Instant};

use crate::app::*;

/// How long a first `clear` waits for its confirmation.
pub const CLEAR_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

const HELP: &str = "\
Commands:
  add <names>       add names separated by commas
  load <path>       add the names of a CSV file
  demo              add the demo names
  list              show the roster
  dupes             show the duplicated names
  dedup             keep the first participant of each name
  clear             remove everybody (type it twice)
  draw              draw a winner
  repeats on|off    allow or forbid winning twice
  history           show the winners, most recent first
  reset             forget all the winners
  group <size>      split the roster into random groups
  export <path>     write the groups to a CSV file
  help              show this message
  quit              leave the session";

pub struct Session<R: RandomSource> {
    roster: Roster,
    lottery: Lottery,
    grouping: Option<Grouping>,
    group_size: usize,
    clear_requested_at: Option<Instant>,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    pub fn new(roster: Roster, settings: LotterySettings, group_size: usize, rng: R) -> Session<R> {
        Session {
            roster,
            lottery: Lottery::new(settings),
            grouping: None,
            group_size,
            clear_requested_at: None,
            rng,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn lottery(&self) -> &Lottery {
        &self.lottery
    }

    /// The groups, if the roster has not changed since they were made.
    pub fn groups(&self) -> Option<&[Group]> {
        self.grouping
            .as_ref()
            .filter(|g| g.is_current(&self.roster))
            .map(|g| g.groups.as_slice())
    }

    /// Processes commands until `quit` or the end of the input.
    pub fn run<B: BufRead, W: Write>(&mut self, input: B, out: &mut W) -> AppResult<()> {
        writeln!(out, "{} participants loaded. Type help for the commands.", self.roster.len())
            .context(WritingOutputSnafu {})?;
        for line in input.lines() {
            let line = line.context(ReadingInputSnafu {})?;
            if !self.handle(line.trim(), out)? {
                break;
            }
        }
        Ok(())
    }

    /// Runs one command. Returns false when the session is over.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> AppResult<bool> {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        debug!("session: command {:?} argument {:?}", cmd, rest);
        if cmd != "clear" {
            self.clear_requested_at = None;
        }
        let res = match cmd {
            "" => Ok(()),
            "quit" | "exit" => return Ok(false),
            "help" => writeln!(out, "{}", HELP).context(WritingOutputSnafu {}),
            "add" => {
                let added = self.roster.ingest_text(rest);
                writeln!(out, "Added {} participants ({} in total)", added, self.roster.len())
                    .context(WritingOutputSnafu {})
            }
            "load" => self.load(rest, out),
            "demo" => {
                let added = self.roster.load_demo();
                writeln!(out, "Added {} demo participants", added).context(WritingOutputSnafu {})
            }
            "list" => self.list(out),
            "dupes" => self.dupes(out),
            "dedup" => {
                let removed = self.roster.remove_duplicates();
                writeln!(out, "Removed {} duplicates ({} left)", removed, self.roster.len())
                    .context(WritingOutputSnafu {})
            }
            "clear" => self.clear(out),
            "draw" => self.draw(out),
            "repeats" => self.repeats(rest, out),
            "history" => self.history(out),
            "reset" => {
                self.lottery.reset();
                writeln!(out, "Lottery history cleared").context(WritingOutputSnafu {})
            }
            "group" => self.group(rest, out),
            "export" => self.export(rest, out),
            x => writeln!(out, "Unknown command {:?}, type help for the commands", x)
                .context(WritingOutputSnafu {}),
        };
        match res {
            Ok(()) => {}
            // Errors of the core and of the inputs are shown and the session goes on.
            Err(AppError::WritingOutput { source }) => {
                return Err(AppError::WritingOutput { source })
            }
            Err(e) => {
                warn!("session: {:?}", e);
                writeln!(out, "error: {}", e).context(WritingOutputSnafu {})?;
            }
        }
        if self.grouping.as_ref().map_or(false, |g| !g.is_current(&self.roster)) {
            debug!("session: roster changed, dropping groups");
            self.grouping = None;
        }
        Ok(true)
    }

    fn load<W: Write>(&mut self, path: &str, out: &mut W) -> AppResult<()> {
        let added = io_csv::read_csv_roster(path, &mut self.roster)?;
        writeln!(out, "Added {} participants ({} in total)", added, self.roster.len())
            .context(WritingOutputSnafu {})
    }

    fn list<W: Write>(&self, out: &mut W) -> AppResult<()> {
        let report = self.roster.duplicates();
        writeln!(out, "{} participants", self.roster.len()).context(WritingOutputSnafu {})?;
        for (idx, p) in self.roster.participants().iter().enumerate() {
            let marker = if report.count(&p.name) > 1 { " (duplicate)" } else { "" };
            writeln!(out, "{:>4}. {} [{}]{}", idx + 1, p.name, p.id, marker)
                .context(WritingOutputSnafu {})?;
        }
        Ok(())
    }

    fn dupes<W: Write>(&self, out: &mut W) -> AppResult<()> {
        let report = self.roster.duplicates();
        if !report.has_duplicates {
            return writeln!(out, "No duplicated names").context(WritingOutputSnafu {});
        }
        for name in report.duplicated_names() {
            writeln!(out, "{} x{}", name, report.count(name)).context(WritingOutputSnafu {})?;
        }
        Ok(())
    }

    fn clear<W: Write>(&mut self, out: &mut W) -> AppResult<()> {
        let confirmed = self
            .clear_requested_at
            .map_or(false, |t| t.elapsed() <= CLEAR_CONFIRM_WINDOW);
        if confirmed {
            self.clear_requested_at = None;
            self.roster.clear();
            writeln!(out, "Roster cleared").context(WritingOutputSnafu {})
        } else {
            self.clear_requested_at = Some(Instant::now());
            writeln!(
                out,
                "Type clear again within {} seconds to remove {} participants",
                CLEAR_CONFIRM_WINDOW.as_secs(),
                self.roster.len()
            )
            .context(WritingOutputSnafu {})
        }
    }

    /// Commands run one at a time, so a draw always ends before the next one
    /// starts. A draw interrupted by an output failure is cancelled.
    fn draw<W: Write>(&mut self, out: &mut W) -> AppResult<()> {
        self.lottery
            .begin_draw(self.roster.participants())
            .context(CoreSnafu {})?;
        let res = self.animate_draw(out);
        if res.is_err() {
            self.lottery.cancel_draw();
        }
        res
    }

    fn animate_draw<W: Write>(&mut self, out: &mut W) -> AppResult<()> {
        let interval = self.lottery.settings().frame_interval;
        loop {
            match self
                .lottery
                .tick(self.roster.participants(), &mut self.rng)
                .context(CoreSnafu {})?
            {
                DrawFrame::Spin(p) => {
                    writeln!(out, "  ... {}", p.name).context(WritingOutputSnafu {})?;
                    out.flush().context(WritingOutputSnafu {})?;
                    thread::sleep(interval);
                }
                DrawFrame::Winner(p) => {
                    let remaining = self.lottery.remaining_pool(self.roster.participants()).len();
                    return writeln!(
                        out,
                        "Winner: {} ({} left / {})",
                        p.name,
                        remaining,
                        self.roster.len()
                    )
                    .context(WritingOutputSnafu {});
                }
                DrawFrame::Idle => return Ok(()),
            }
        }
    }

    fn repeats<W: Write>(&mut self, arg: &str, out: &mut W) -> AppResult<()> {
        let allow = match arg {
            "on" => true,
            "off" => false,
            x => whatever!("expected on or off, got {:?}", x),
        };
        self.lottery.set_allow_repeats(allow);
        let remaining = self.lottery.remaining_pool(self.roster.participants()).len();
        writeln!(
            out,
            "Repeats {}, {} participants can win",
            if allow { "allowed" } else { "forbidden" },
            remaining
        )
        .context(WritingOutputSnafu {})
    }

    fn history<W: Write>(&self, out: &mut W) -> AppResult<()> {
        let history = self.lottery.history();
        writeln!(out, "{} winners", history.len()).context(WritingOutputSnafu {})?;
        for (idx, p) in history.iter().enumerate() {
            writeln!(out, "{:>4}. {}", history.len() - idx, p.name)
                .context(WritingOutputSnafu {})?;
        }
        Ok(())
    }

    fn group<W: Write>(&mut self, arg: &str, out: &mut W) -> AppResult<()> {
        if self.roster.is_empty() {
            return writeln!(out, "The roster is empty").context(WritingOutputSnafu {});
        }
        let requested = if arg.is_empty() {
            self.group_size
        } else {
            parse_group_size(arg).context(CoreSnafu {})?
        };
        let group_size = clamp_group_size(requested, self.roster.len());
        self.group_size = group_size;
        let grouping =
            Grouping::generate(&self.roster, group_size, &mut self.rng).context(CoreSnafu {})?;
        for g in grouping.groups.iter() {
            let names: Vec<&str> = g.members.iter().map(|p| p.name.as_str()).collect();
            writeln!(out, "Group {} ({}): {}", g.id, g.members.len(), names.join(", "))
                .context(WritingOutputSnafu {})?;
        }
        self.grouping = Some(grouping);
        Ok(())
    }

    fn export<W: Write>(&self, path: &str, out: &mut W) -> AppResult<()> {
        let groups = match self.groups() {
            Some(g) => g,
            None => whatever!("no groups to export, run group first"),
        };
        if path.is_empty() {
            whatever!("missing file name");
        }
        io_export::export_groups(path, groups)?;
        writeln!(out, "Groups written to {}", path).context(WritingOutputSnafu {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(names: &str) -> Session<SeededRng> {
        let mut roster = Roster::new();
        roster.ingest_text(names);
        let settings = LotterySettings {
            animation_frames: 2,
            frame_interval: Duration::from_millis(0),
            ..LotterySettings::DEFAULT_SETTINGS
        };
        Session::new(roster, settings, 2, SeededRng::from_seed(17))
    }

    fn run(s: &mut Session<SeededRng>, script: &str) -> String {
        let mut out: Vec<u8> = Vec::new();
        s.run(Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_and_dedup() {
        let mut s = session("");
        let text = run(&mut s, "add Anna, Bob, Anna\ndupes\ndedup\nlist\n");
        assert!(text.contains("Added 3 participants"));
        assert!(text.contains("Anna x2"));
        assert!(text.contains("Removed 1 duplicates"));
        assert_eq!(s.roster().len(), 2);
    }

    #[test]
    fn clear_needs_confirmation() {
        let mut s = session("A,B");
        run(&mut s, "clear\nlist\n");
        assert_eq!(s.roster().len(), 2);
        run(&mut s, "clear\nclear\n");
        assert!(s.roster().is_empty());
    }

    #[test]
    fn draws_until_empty() {
        let mut s = session("A,B");
        let text = run(&mut s, "draw\ndraw\ndraw\nhistory\n");
        assert_eq!(text.matches("Winner:").count(), 2);
        assert!(text.contains("error: everyone has already been drawn"));
        assert_eq!(s.lottery().history().len(), 2);

        let text = run(&mut s, "reset\ndraw\n");
        assert!(text.contains("Winner:"));
        assert_eq!(s.lottery().history().len(), 1);
    }

    /// Accepts a fixed number of writes, then fails.
    struct BrokenPipe {
        writes_left: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.writes_left == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.writes_left -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn interrupted_draw_is_cancelled() {
        let mut s = session("A,B,C");
        let mut broken = BrokenPipe { writes_left: 0 };
        assert!(matches!(
            s.handle("draw", &mut broken),
            Err(AppError::WritingOutput { .. })
        ));
        assert!(!s.lottery().is_drawing());
        assert!(s.lottery().history().is_empty());

        let text = run(&mut s, "draw\n");
        assert!(text.contains("Winner:"));
        assert_eq!(s.lottery().history().len(), 1);
    }

    #[test]
    fn repeats_toggle() {
        let mut s = session("Solo");
        let text = run(&mut s, "draw\nrepeats on\ndraw\nrepeats maybe\n");
        assert_eq!(text.matches("Winner: Solo").count(), 2);
        assert!(text.contains("error: expected on or off"));
        assert!(s.lottery().allow_repeats());
    }

    #[test]
    fn groups_are_dropped_when_roster_changes() {
        let mut s = session("A,B,C,D,E");
        let text = run(&mut s, "group 2\n");
        assert!(text.contains("Group 3 (1)"));
        assert_eq!(s.groups().map(|g| g.len()), Some(3));
        let text = run(&mut s, "add F\nexport /nonexistent/groups.csv\n");
        assert!(s.groups().is_none());
        assert!(text.contains("error: no groups to export"));
    }

    #[test]
    fn invalid_group_size() {
        let mut s = session("A,B,C");
        let text = run(&mut s, "group zero\ngroup 0\n");
        assert_eq!(text.matches("error: invalid group size").count(), 2);
        assert!(s.groups().is_none());
    }

    #[test]
    fn export_groups_file() {
        let mut s = session("A,B,C,D");
        let path = std::env::temp_dir().join(format!("luckydraw-session-{}.csv", std::process::id()));
        let path = path.display().to_string();
        let text = run(&mut s, &format!("group 2\nexport {}\n", path));
        assert!(text.contains("Groups written to"));
        let content = fs::read(&path).unwrap();
        assert!(content.starts_with(b"\xEF\xBB\xBFgroup,name\n"));
    }

    #[test]
    fn quit_stops() {
        let mut s = session("");
        run(&mut s, "add A\nquit\nadd B\n");
        assert_eq!(s.roster().len(), 1);
    }
}
