mod common;

use std::io::Cursor;
use std::thread;
use std::time::Duration;

use common::wait_until;
use termbridge::bridge::{Bridge, BridgeOptions, MouseTracking};
use termbridge::echo::EchoProgram;
use termbridge::events::{PointerAction, ResizeEvent};
use termbridge::host::{serve_lines, HostCommand, HostReply};

fn options() -> BridgeOptions {
    BridgeOptions::default()
        .poll_interval(Duration::from_millis(5))
        .mouse_tracking(MouseTracking::Off)
}

fn replies(output: &[u8]) -> Vec<HostReply> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn serves_one_reply_per_command() {
    let (bridge, ops) = Bridge::new(EchoProgram, options());
    let runner = thread::spawn(move || bridge.run());
    let mut text = String::new();
    assert!(wait_until(Duration::from_secs(2), || {
        text.push_str(&ops.output.drain_text());
        text.contains("echo ready")
    }));

    let script = concat!(
        r#"{"op":"resize","width":120,"height":40}"#,
        "\n",
        r#"{"op":"mouse","args":[0,1,3]}"#,
        "\n",
        "\n",
        "not json\n",
        r#"{"op":"mouse","args":[2,0,3,4]}"#,
        "\n",
        r#"{"op":"write","data":"hiq"}"#,
        "\n",
    );

    let mut output = Vec::new();
    serve_lines(Cursor::new(script), &mut output, &ops).unwrap();

    let replies = replies(&output);
    assert_eq!(replies.len(), 5);
    assert_eq!(replies[0], HostReply::Ok);
    assert!(matches!(&replies[1], HostReply::Rejected { error } if error.contains("at least 4")));
    assert!(matches!(&replies[2], HostReply::Rejected { error } if error.contains("malformed")));
    assert_eq!(replies[3], HostReply::Ok);
    assert_eq!(replies[4], HostReply::Ok);

    // End of host input detached the bridge, but queued input is still read.
    let model = runner.join().unwrap().unwrap();
    assert_eq!(
        model.size,
        Some(ResizeEvent {
            width: 120,
            height: 40
        })
    );
    assert_eq!(model.pointer.len(), 1);
    assert_eq!(model.pointer[0].action, PointerAction::Motion);
    assert_eq!(model.echoed, b"hi");

    text.push_str(&ops.output.drain_text());
    assert!(text.contains("resize 120x40"));
    assert!(text.contains("hi"));
    assert!(text.contains("bye"));
}

#[test]
fn read_returns_program_output() {
    let (bridge, ops) = Bridge::new(EchoProgram, options());
    let runner = thread::spawn(move || bridge.run());

    assert_eq!(
        ops.invoke(HostCommand::Write {
            data: "héllo".to_string()
        }),
        HostReply::Ok
    );

    let mut collected = String::new();
    for _ in 0..200 {
        if let HostReply::Output { data } = ops.invoke(HostCommand::Read) {
            collected.push_str(&data);
        }
        if collected.contains("héllo") {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert!(collected.starts_with("echo ready"));
    assert!(collected.contains("héllo"));

    ops.invoke(HostCommand::Write {
        data: "q".to_string(),
    });
    runner.join().unwrap().unwrap();

    assert_eq!(ops.invoke(HostCommand::Detach), HostReply::Ok);
    assert!(matches!(
        ops.invoke(HostCommand::Write {
            data: "late".to_string()
        }),
        HostReply::Rejected { .. }
    ));
}

#[test]
fn detach_ends_echo_session_with_model() {
    let (bridge, ops) = Bridge::new(EchoProgram, options());
    let runner = thread::spawn(move || bridge.run());

    assert_eq!(
        ops.invoke(HostCommand::Write {
            data: "abc".to_string()
        }),
        HostReply::Ok
    );
    let mut text = String::new();
    assert!(wait_until(Duration::from_secs(2), || {
        text.push_str(&ops.output.drain_text());
        text.contains("abc")
    }));
    assert_eq!(ops.invoke(HostCommand::Detach), HostReply::Ok);

    let model = runner.join().unwrap().unwrap();
    assert_eq!(model.echoed, b"abc");
}
