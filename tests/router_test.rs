//! Router integration tests: startup gating, subscription toggles, the
//! command flow and disconnect handling, all through the console gateway.

mod common;

use std::sync::{Arc, Mutex, Once};

use relaybot::infrastructure::adapters::console::ConsoleGateway;
use relaybot::infrastructure::session::SessionMode;
use relaybot::{BotError, Event, EventKind, Gateway, Message, Options, Router, User};

use common::{scratch_dir, valid_options, RecordingGateway};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

fn standalone(options: Options, gateway: Arc<ConsoleGateway>) -> Result<Router, BotError> {
    Router::with_mode(options, gateway, SessionMode::Standalone)
}

#[test]
fn invalid_options_never_reach_the_gateway() {
    ensure_init();
    let gateway = Arc::new(RecordingGateway::new());

    let mut options = valid_options(&scratch_dir("gate"));
    options.token = None;
    options.owners = vec!["not-a-snowflake".to_string()];

    let result = Router::with_mode(options, gateway.clone(), SessionMode::Standalone);
    assert!(matches!(result, Err(BotError::Config(_))));
    assert!(gateway.calls().is_empty());
    assert_eq!(gateway.subscription_count(), 0);
}

#[tokio::test]
async fn missing_plugins_dir_aborts_before_login() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());

    let mut options = valid_options(&scratch_dir("missing"));
    options.plugins_dir = options.plugins_dir.join("does-not-exist");

    let router = standalone(options, gateway.clone()).unwrap();
    let result = router.start().await;

    assert!(matches!(result, Err(BotError::Plugin(_))));
    assert_eq!(gateway.login_count(), 0);
    assert_eq!(gateway.subscription_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn startup_logs_in_and_relays_ready() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());
    let router = Arc::new(
        standalone(valid_options(&scratch_dir("ready")), gateway.clone()).unwrap(),
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        router.context().bus().subscribe(move |event| {
            seen.lock().unwrap().push(event.kind());
        });
    }

    // The ready event is published by the pump, so run startup concurrently
    // and close the stream once it arrives.
    let handle = {
        let router = Arc::clone(&router);
        tokio::spawn(async move { router.start().await })
    };
    for _ in 0..200 {
        if !seen.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    gateway.close();
    handle.await.unwrap().unwrap();

    assert_eq!(gateway.login_count(), 1);
    assert_eq!(*seen.lock().unwrap(), vec![EventKind::Ready]);
}

#[tokio::test]
async fn disabled_flags_install_no_subscriptions() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());
    let mut options = valid_options(&scratch_dir("flags-off"));
    options.reactions = false;
    options.members = false;
    options.guilds = false;

    let router = standalone(options, gateway.clone()).unwrap();
    gateway.close();
    router.start().await.unwrap();

    // Only ready, disconnected and message remain.
    assert_eq!(gateway.subscription_count(), 3);
    assert!(!gateway.is_subscribed(EventKind::ReactionAdded));
    assert!(!gateway.is_subscribed(EventKind::ReactionRemoved));
    assert!(!gateway.is_subscribed(EventKind::MemberJoined));
    assert!(!gateway.is_subscribed(EventKind::GuildJoined));
}

#[tokio::test]
async fn enabled_flags_install_their_subscriptions() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());
    let mut options = valid_options(&scratch_dir("flags-on"));
    options.reactions = true;
    options.members = true;
    options.guilds = true;

    let router = standalone(options, gateway.clone()).unwrap();
    gateway.close();
    router.start().await.unwrap();

    assert_eq!(gateway.subscription_count(), 9);
    assert!(gateway.is_subscribed(EventKind::ReactionAdded));
    assert!(gateway.is_subscribed(EventKind::MemberLeft));
    assert!(gateway.is_subscribed(EventKind::GuildLeft));
}

#[tokio::test]
async fn trigger_messages_surface_as_command_events() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());
    let router = standalone(valid_options(&scratch_dir("cmd")), gateway.clone()).unwrap();

    let commands = Arc::new(Mutex::new(Vec::new()));
    {
        let commands = Arc::clone(&commands);
        router.context().bus().subscribe(move |event| {
            if let Event::Command(cmd) = event {
                commands.lock().unwrap().push((cmd.name.clone(), cmd.args.clone()));
            }
        });
    }

    gateway.inject_line("!ping extra");
    gateway.inject_line("not a command");
    gateway.inject_line("!");
    gateway.close();
    router.start().await.unwrap();

    let commands = commands.lock().unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0],
        ("ping".to_string(), vec!["!ping".to_string(), "extra".to_string()])
    );
    assert_eq!(commands[1], (String::new(), vec!["!".to_string()]));
}

#[tokio::test]
async fn bot_authored_messages_yield_no_commands() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());
    let router = standalone(valid_options(&scratch_dir("self")), gateway.clone()).unwrap();

    let commands = Arc::new(Mutex::new(0usize));
    {
        let commands = Arc::clone(&commands);
        router.context().bus().subscribe(move |event| {
            if matches!(event, Event::Command(_)) {
                *commands.lock().unwrap() += 1;
            }
        });
    }

    // Authored by the bot's own account.
    let me = gateway.current_user().unwrap();
    gateway.inject(Event::MessageCreate(Message::new("console", me, "!ping")));
    // Authored by some other automated account.
    let robot = User::new("400000000000000004").as_bot();
    gateway.inject(Event::MessageCreate(Message::new("console", robot, "!ping")));
    gateway.close();
    router.start().await.unwrap();

    assert_eq!(*commands.lock().unwrap(), 0);
}

#[tokio::test]
async fn disconnect_forwards_once_and_reconnects_once() {
    ensure_init();
    let gateway = Arc::new(ConsoleGateway::new());
    let router = standalone(valid_options(&scratch_dir("reconnect")), gateway.clone()).unwrap();

    let disconnects = Arc::new(Mutex::new(0usize));
    {
        let disconnects = Arc::clone(&disconnects);
        router.context().bus().subscribe(move |event| {
            if matches!(event, Event::Disconnected) {
                *disconnects.lock().unwrap() += 1;
            }
        });
    }

    gateway.inject(Event::Disconnected);
    gateway.close();
    router.start().await.unwrap();

    assert_eq!(*disconnects.lock().unwrap(), 1);
    // Initial login plus exactly one reconnect.
    assert_eq!(gateway.login_count(), 2);
}
