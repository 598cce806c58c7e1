use ping_sweep_rs::addrs::parse_addrs_str;

#[test]
fn parse_addresses_with_comments_and_junk() {
    let input = r#"
        # lab hosts
        10.0.0.1   # gateway
        192.168.1.20
        not-an-ip
        300.1.1.1
        ::1

    "#;

    let addrs = parse_addrs_str(input);
    assert_eq!(addrs, vec!["10.0.0.1", "192.168.1.20", "::1"]);
}

#[test]
fn comment_only_input_is_empty() {
    let input = "# nothing here\n\n   \n";
    assert!(parse_addrs_str(input).is_empty());
}
