use std::str::FromStr;

use rand::random;

use ledger_cursor::{
    cursor::{bip32::harden, Bip32Path, Buffer, Endianness, Error as CursorError},
    decode, Error, Layout, Value,
};

/// Build a wallet key request style payload: path, account index, amount and memo
fn build_payload(path: &Bip32Path, account: u32, amount: u64, memo: &[u8]) -> Vec<u8> {
    let mut d = vec![0u8; 128];

    let mut b = Buffer::new(&mut d[..]);
    b.write_bip32_path(path.as_slice()).unwrap();
    b.write_u32(account, Endianness::Little).unwrap();
    b.write_varint(amount).unwrap();
    b.write_compact_size(memo.len() as u64).unwrap();
    b.write_bytes(memo).unwrap();
    let n = b.offset();

    d.truncate(n);
    d
}

#[test]
fn decode_built_payloads() {
    let layout = Layout::from_str("path,u32le,varint,compact,rest").unwrap();

    for _ in 0..16 {
        let path = Bip32Path::from_slice(&[harden(44), harden(535348), harden(random::<u32>() >> 1)])
            .unwrap();
        let (account, amount): (u32, u64) = (random(), random());
        let memo: [u8; 8] = random();

        let d = build_payload(&path, account, amount, &memo);

        let r = decode(&layout, &d, false).unwrap();
        assert_eq!(r.len(), 5);

        assert_eq!(r[0].value, Value::Path(path.to_string()));
        assert_eq!(r[1].value, Value::Int(account as u64));
        assert_eq!(r[2].value, Value::Int(amount));
        assert_eq!(r[3].value, Value::Int(memo.len() as u64));
        assert_eq!(r[4].value, Value::Bytes(hex::encode(memo)));

        // Fields are contiguous and cover the payload
        let mut offset = 0;
        for f in &r {
            assert_eq!(f.offset, offset);
            offset += f.len;
        }
        assert_eq!(offset, d.len());
    }
}

#[test]
fn decode_path_over_limit() {
    // Count byte exceeds the maximum path depth
    let mut d = vec![11u8];
    d.extend_from_slice(&[0u8; 44]);

    let layout = Layout::from_str("path").unwrap();

    match decode(&layout, &d, false) {
        Err(Error::Field { err, offset, .. }) => {
            assert_eq!(err, CursorError::InvalidLength);
            assert_eq!(offset, 0);
        }
        r => panic!("unexpected result: {r:?}"),
    }
}

#[test]
fn decode_json_output() {
    let layout = Layout::from_str("u8,bytes:2").unwrap();

    let r = decode(&layout, &[0x01, 0xab, 0xcd], false).unwrap();
    let v = serde_json::to_value(&r).unwrap();

    assert_eq!(v[0]["field"], "u8");
    assert_eq!(v[0]["value"]["kind"], "int");
    assert_eq!(v[0]["value"]["value"], 1);
    assert_eq!(v[1]["field"], "bytes:2");
    assert_eq!(v[1]["value"]["value"], "abcd");
}
