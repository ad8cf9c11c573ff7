//! Terminal shim and entry point.
//!
//! This is the thin integration layer between the SleepBunny library and a
//! plain terminal. One reader thread forwards stdin lines over a channel; the
//! main loop alternates between handling typed commands and driving the
//! library's `tick` so timer-driven sequences (the eating dots, the deferred
//! playback start, the sleep timer) keep firing while the user is idle.
//!
//! # Commands
//!
//! - `tap`: bounce the bunny
//! - `call`: call the bunny by name
//! - `feed <food>`: feed the bunny (`carrot`, `cabbage`, `apple`, `lettuce`)
//! - `read <book-id>` / `close`: open and close a bedtime story
//! - `books`: list the story library
//! - `play <sound-id> [minutes]`: start an ambient sound
//! - `sounds`: list the sound catalog
//! - `pause`, `stop`: control the session
//! - `volume <0-100>`: set playback volume
//! - `timer <minutes>`: arm the sleep timer (0 clears)
//! - `name <name>`: name the bunny's person
//! - `dark`: toggle dark mode
//! - `stats`: show lifetime statistics
//! - `export`, `reset`: manage persisted data
//! - `quit`: exit

use std::sync::mpsc;
use std::time::{Duration, Instant};

use sleepbunny::app::AppEvent;
use sleepbunny::audio::PlaybackEvent;
use sleepbunny::domain::Result;
use sleepbunny::mood::messages::WELCOME_MESSAGES;
use sleepbunny::mood::MoodEvent;
use sleepbunny::observability::init_tracing;
use sleepbunny::runtime::{RandomSource, ThreadRandom};
use sleepbunny::{initialize, Command, Config, Dispatcher};

/// Main loop tick interval. Fine enough for the 100 ms celebration steps.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    let config = load_config();
    init_tracing(&config);

    if let Err(e) = run(&config) {
        eprintln!("sleepbunny: {e}");
        std::process::exit(1);
    }
}

/// Loads configuration from the path given as the first argument, falling
/// back to defaults when none is given or the file is absent.
fn load_config() -> Config {
    let Some(path) = std::env::args().nth(1) else {
        return Config::default();
    };
    match Config::from_file(std::path::Path::new(&path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sleepbunny: ignoring config {path}: {e}");
            Config::default()
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let mut app = initialize(config)?;

    let mut random = ThreadRandom;
    let welcome = WELCOME_MESSAGES[random.pick(WELCOME_MESSAGES.len())];
    match app.user_name() {
        Some(name) => println!("🐰 {name}님, 다시 만나서 반가워요! {welcome}"),
        None => println!("🐰 안녕하세요! {welcome} ('name <이름>'으로 이름을 알려주세요)"),
    }
    println!("   (도움말: help, 종료: quit)");

    let lines = spawn_stdin_reader();

    loop {
        match lines.recv_timeout(TICK_INTERVAL) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    // fall through to the tick below
                } else if matches!(line, "quit" | "exit") {
                    println!("🐰 잘 자요! 💤");
                    return Ok(());
                } else if !handle_line(&mut app, line) {
                    continue;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }

        present(app.tick(Instant::now()));
    }
}

/// Spawns the stdin reader thread. The channel closes on EOF.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = String::new();
        loop {
            buf.clear();
            match std::io::stdin().read_line(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(buf.clone()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Parses and dispatches one input line. Returns `true` when a command ran.
fn handle_line(app: &mut Dispatcher, line: &str) -> bool {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "help" => {
            print_help();
            return false;
        }
        "books" => {
            for book in app.library().all() {
                println!("  {} - {} ({})", book.id, book.title, book.author);
            }
            return false;
        }
        "sounds" => {
            for sound in app.playback().catalog().all() {
                println!("  {} - {} {}", sound.id, sound.name, sound.emoji);
            }
            return false;
        }
        "stats" => {
            print_stats(app);
            return false;
        }
        "tap" => Command::Tap,
        "call" => Command::CallName,
        "feed" => {
            if rest.is_empty() {
                println!("feed <food> 로 입력해주세요 (carrot, cabbage, apple, lettuce)");
                return false;
            }
            Command::Feed {
                food: rest.to_string(),
            }
        }
        "read" => {
            let book_id = rest.to_string();
            match app.dispatch(Command::OpenBook {
                book_id: book_id.clone(),
            }) {
                Ok(events) => {
                    present(events);
                    if let Ok(book) = app.library().get(&book_id) {
                        println!("📖 {} ({})", book.title, book.author);
                        println!("{}", book.content);
                    }
                }
                Err(e) => println!("⚠️  {e}"),
            }
            return true;
        }
        "close" => Command::CloseBook {
            last_position: 0,
            completed: false,
        },
        "play" => {
            let mut parts = rest.split_whitespace();
            let sound_id = parts.next().unwrap_or("").to_string();
            let timer_minutes = parts.next().and_then(|m| m.parse().ok());
            Command::PlaySound {
                sound_id,
                timer_minutes,
            }
        }
        "pause" => Command::PauseOrResume,
        "stop" => Command::StopSound,
        "volume" => match rest.parse::<f32>() {
            Ok(percent) => Command::SetVolume {
                volume: percent / 100.0,
            },
            Err(_) => {
                println!("volume 0-100 으로 입력해주세요");
                return false;
            }
        },
        "timer" => match rest.parse::<u32>() {
            Ok(minutes) => Command::SetTimer { minutes },
            Err(_) => {
                println!("timer <분> 으로 입력해주세요");
                return false;
            }
        },
        "name" => Command::SetUserName {
            name: rest.to_string(),
        },
        "dark" => Command::ToggleDarkMode,
        "export" => Command::Export,
        "reset" => Command::Reset,
        other => {
            println!("모르는 명령어예요: {other} (help 를 입력해보세요)");
            return false;
        }
    };

    match app.dispatch(command) {
        Ok(events) => present(events),
        Err(e) => println!("⚠️  {e}"),
    }
    true
}

/// Prints the user-visible rendering of a batch of events.
fn present(events: Vec<AppEvent>) {
    for event in events {
        match event {
            AppEvent::Mood(MoodEvent::StateChanged { message, .. })
            | AppEvent::Mood(MoodEvent::MessageChanged { message }) => {
                println!("🐰 {message}");
            }
            AppEvent::Mood(_) => {}
            AppEvent::Playback(PlaybackEvent::Started {
                name, simulated, ..
            }) => {
                if simulated {
                    println!("🎵 {name} (음원 준비 중이에요)");
                } else {
                    println!("🎵 {name} 재생 중");
                }
            }
            AppEvent::Playback(PlaybackEvent::SimulatedNotice { .. }) => {}
            AppEvent::Playback(PlaybackEvent::Stopped) => println!("🔇 소리를 멈췄어요"),
            AppEvent::Playback(PlaybackEvent::TimerFinished) => {
                println!("⏰ 타이머가 끝났어요. 좋은 꿈 꾸세요!");
            }
            AppEvent::DarkModeChanged(on) => {
                println!("{}", if on { "🌙 어두운 모드" } else { "☀️ 밝은 모드" });
            }
            AppEvent::BackupExported(json) => println!("{json}"),
            AppEvent::BackupImported => println!("💾 백업을 불러왔어요"),
            AppEvent::DataReset => println!("🗑️ 모든 데이터를 지웠어요"),
            AppEvent::Notice(notice) => println!("💬 {notice}"),
        }
    }
}

fn print_stats(app: &Dispatcher) {
    let doc = app.store().load_or_default();
    println!("📊 통계");
    println!("  밥 준 횟수: {}", doc.statistics.total_feeds);
    println!("  소리 재생: {}", doc.statistics.total_sound_plays);
    println!("  이름 부르기: {}", doc.statistics.total_call_names);
    println!("  앱 실행: {}", doc.statistics.app_open_count);
    for (food, count) in &doc.statistics.feed_details {
        println!("    {food}: {count}");
    }
}

fn print_help() {
    println!("명령어:");
    println!("  tap | call | feed <food> | read <book-id> | close");
    println!("  play <sound-id> [minutes] | pause | stop");
    println!("  volume <0-100> | timer <minutes>");
    println!("  name <이름> | dark | stats | books | sounds");
    println!("  export | reset | quit");
}
