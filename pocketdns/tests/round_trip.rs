use pocketdns::dns::{
    DnsError, RecordName, ResolverTable, decode_response, encode_query, encode_response, respond,
};
use pocketdns::utils::parse_hex;
use std::net::Ipv4Addr;

const NAMES: &[&str] = &[
    "google.com",
    "a.b",
    "x",
    "www.cs.uwaterloo.ca",
    "MiXeD.Case.Example.",
    "xn--bcher-kva.example",
];

fn address_lists() -> Vec<Vec<Ipv4Addr>> {
    vec![
        vec![Ipv4Addr::new(192, 165, 1, 1)],
        vec![Ipv4Addr::new(192, 165, 1, 1), Ipv4Addr::new(192, 165, 1, 10)],
        (0..20).map(|i| Ipv4Addr::new(10, 0, 0, i)).collect(),
        vec![Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST],
    ]
}

#[test]
fn addresses_survive_query_response_round_trip() {
    for name in NAMES {
        for ips in address_lists() {
            let query = encode_query(name, None).unwrap();
            let response = encode_response(&query, &ips).unwrap();
            let msg = decode_response(&response).unwrap();

            assert_eq!(msg.addresses, ips, "name {name}");
            assert_eq!(msg.header.an_count as usize, ips.len());
            assert!(
                msg.answers
                    .iter()
                    .all(|rr| rr.owner == RecordName::Pointer(12) && rr.ttl == 260)
            );
        }
    }
}

#[test]
fn transaction_id_is_preserved() {
    for id in [0u16, 1, 0x268c, u16::MAX] {
        let query = encode_query("youtube.com", Some(id)).unwrap();
        let response = encode_response(&query, &[Ipv4Addr::LOCALHOST]).unwrap();

        assert_eq!(&response[..2], &id.to_be_bytes());
        assert_eq!(decode_response(&response).unwrap().header.id, id);
    }
}

#[test]
fn google_question_bytes() {
    let query = encode_query("google.com", Some(0x268c)).unwrap();
    let expected =
        parse_hex("26 8c 01 00 00 01 00 00 00 00 00 00 06 67 6f 6f 67 6c 65 03 63 6f 6d 00 00 01 00 01")
            .unwrap();

    assert_eq!(query, expected);
}

#[test]
fn responder_output_decodes_to_table_entry() {
    let table = ResolverTable::default();
    let query = encode_query("google.com", Some(0x268c)).unwrap();
    let response = respond(&query, &table).unwrap();

    let expected = parse_hex(
        "26 8c 84 00 00 01 00 02 00 00 00 00 06 67 6f 6f 67 6c 65 03 63 6f 6d 00 00 01 00 01 \
         c0 0c 00 01 00 01 00 00 01 04 00 04 c0 a5 01 01 \
         c0 0c 00 01 00 01 00 00 01 04 00 04 c0 a5 01 0a",
    )
    .unwrap();
    assert_eq!(response, expected);

    let msg = decode_response(&response).unwrap();
    assert_eq!(msg.header.an_count, 2);
    assert_eq!(
        msg.addresses,
        vec![Ipv4Addr::new(192, 165, 1, 1), Ipv4Addr::new(192, 165, 1, 10)]
    );
}

#[test]
fn response_without_question_type_and_class_is_rejected() {
    // Ten stray bytes after the header and no QTYPE/QCLASS after the name.
    let bytes = parse_hex(
        "26 8c 84 00 00 01 00 02 00 00 00 00 01 00 00 01 00 00 00 00 00 00 \
         06 67 6f 6f 67 6c 65 03 63 6f 6d 00 \
         c0 0c 00 01 00 01 00 00 01 04 00 04 c0 a5 01 01 \
         c0 0c 00 01 00 01 00 00 01 04 00 04 c0 a5 01 0a",
    )
    .unwrap();
    assert_eq!(bytes.len(), 66);

    assert!(decode_response(&bytes).is_err());
}

#[test]
fn every_prefix_fails_without_panicking() {
    let query = encode_query("wikipedia.org", Some(7)).unwrap();
    let response = encode_response(&query, &[Ipv4Addr::new(192, 165, 1, 4)]).unwrap();

    for len in 0..response.len() {
        let err = decode_response(&response[..len]).unwrap_err();
        assert!(matches!(
            err,
            DnsError::Truncated { .. } | DnsError::MalformedName { .. }
        ));
        assert!(err.to_string().contains("offset"));
    }
}

#[cfg(feature = "tokio-dep")]
#[test]
fn decoded_message_serializes_to_json() {
    let query = encode_query("amazon.ca", Some(3)).unwrap();
    let response = encode_response(&query, &[Ipv4Addr::new(192, 165, 1, 5)]).unwrap();
    let msg = decode_response(&response).unwrap();

    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["header"]["id"], 3);
    assert_eq!(json["question"]["name"], "amazon.ca");
    assert_eq!(json["addresses"][0], "192.165.1.5");
    assert_eq!(json["answers"][0]["ttl"], 260);
}
