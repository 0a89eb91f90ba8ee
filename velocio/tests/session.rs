use velocio::{Command, Frame, MockChannel, Session, SessionConfig, encode_tokens};

#[test]
fn test_raw_range_reaches_the_device_in_order() {
    let frames = encode_tokens(["56", "[00,01]"]).unwrap();
    assert_eq!(
        frames,
        vec![Frame::new(vec![0x56, 0x00]), Frame::new(vec![0x56, 0x01])]
    );

    let channel = MockChannel::new().with_reply(b"A").with_reply(b"B");
    let mut session = Session::new(channel, SessionConfig::immediate());

    let mut lines = Vec::new();
    session
        .transmit(&frames, |exchange| lines.push(exchange.render().plain_line()))
        .unwrap();

    assert_eq!(lines, vec!["tx: 56 00 rx: 41 | A", "tx: 56 01 rx: 42 | B"]);
    assert_eq!(session.channel().written(), &[vec![0x56, 0x00], vec![0x56, 0x01]]);
}

#[test]
fn test_named_command_sends_every_frame() {
    let command: Command = "read_output_bits".parse().unwrap();
    let mut session = Session::new(MockChannel::new(), SessionConfig::immediate());

    let mut empty_replies = 0;
    let sent = session
        .transmit(&command.frames(), |exchange| {
            if exchange.received.is_empty() {
                empty_replies += 1;
            }
        })
        .unwrap();

    assert_eq!(sent, 6);
    assert_eq!(empty_replies, 6);
    let last = session.channel().written().last().unwrap().clone();
    assert_eq!(last, vec![0x56, 0xff, 0xff, 0x00, 0x08, 0x0a, 0x00, 0x0c]);
}

#[test]
fn test_reversed_range_sends_nothing() {
    let frames = encode_tokens(["56", "[05,02]"]).unwrap();
    assert!(frames.is_empty());

    let mut session = Session::new(MockChannel::new(), SessionConfig::immediate());
    assert_eq!(session.transmit(&frames, |_| {}).unwrap(), 0);

    let channel = session.into_inner();
    assert!(channel.written().is_empty());
    assert_eq!(channel.reads(), 0);
}

#[test]
fn test_failure_on_second_frame_skips_third() {
    let frames = encode_tokens(["[01,03]"]).unwrap();
    assert_eq!(frames.len(), 3);

    let channel = MockChannel::new().with_reply(b"ok").fail_write_at(1);
    let mut session = Session::new(channel, SessionConfig::immediate());

    let mut rendered = Vec::new();
    let result = session.transmit(&frames, |exchange| rendered.push(exchange.render()));

    assert!(result.unwrap_err().is_transport());
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].rx_ascii, "ok");
    assert_eq!(session.channel().written(), &[vec![0x01]]);
}

#[test]
fn test_mixed_view_of_device_text() {
    let channel = MockChannel::new().with_reply([0x41, 0x20, 0xff]);
    let mut session = Session::new(channel, SessionConfig::immediate());

    let mut views = Vec::new();
    session
        .transmit(&Command::Play.frames(), |exchange| views.push(exchange.render()))
        .unwrap();

    assert_eq!(views[0].tx_hex, "56 ff ff 00 07 f1 01");
    assert_eq!(views[0].rx_ascii, "A__");
    assert!(views[0].rx_mixed.ends_with("\x1b[2mff\x1b[0m"));
}
