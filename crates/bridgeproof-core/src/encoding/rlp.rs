use alloy_rlp::Header;

/// Wrap an already-encoded list payload with its RLP list header.
pub fn wrap_list(payload: &[u8]) -> Vec<u8> {
    let header = Header {
        list: true,
        payload_length: payload.len(),
    };
    let mut out = Vec::with_capacity(header.length() + payload.len());
    header.encode(&mut out);
    out.extend_from_slice(payload);
    out
}

/// Minimal RLP list decoder.
///
/// Returns the items of a single top-level list. String items are returned
/// as their payload; nested lists are returned still encoded, header included,
/// so that they can be hashed or decoded again. Trailing bytes after the list
/// are an error.
pub fn decode_list(data: &[u8]) -> Result<Vec<&[u8]>, alloy_rlp::Error> {
    let mut buf = data;
    let header = Header::decode(&mut buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString);
    }
    if buf.len() != header.payload_length {
        return Err(alloy_rlp::Error::UnexpectedLength);
    }

    let mut payload = buf;
    let mut items = Vec::new();
    while !payload.is_empty() {
        items.push(next_item(&mut payload)?);
    }
    Ok(items)
}

/// Decode an RLP byte string and return its payload.
pub fn decode_bytes(data: &[u8]) -> Result<&[u8], alloy_rlp::Error> {
    let mut buf = data;
    let header = Header::decode(&mut buf)?;
    if header.list {
        return Err(alloy_rlp::Error::UnexpectedList);
    }
    if buf.len() != header.payload_length {
        return Err(alloy_rlp::Error::UnexpectedLength);
    }
    Ok(buf)
}

/// Pop the next item off `buf`.
fn next_item<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], alloy_rlp::Error> {
    let start: &'a [u8] = *buf;
    let header = Header::decode(buf)?;
    let header_len = start.len() - buf.len();
    let item = if header.list {
        &start[..header_len + header.payload_length]
    } else {
        &buf[..header.payload_length]
    };
    *buf = &buf[header.payload_length..];
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_single_bytes() {
        // RLP encoding of [0x01, 0x02, 0x03]
        let data = [0xC3, 0x01, 0x02, 0x03];
        let items = decode_list(&data).unwrap();
        assert_eq!(items, vec![&[0x01][..], &[0x02][..], &[0x03][..]]);
    }

    #[test]
    fn test_decode_list_strings_and_nested() {
        // ["abc", "", [0x01]]
        let data = [0xC7, 0x83, 0x61, 0x62, 0x63, 0x80, 0xC1, 0x01];
        let items = decode_list(&data).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], &b"abc"[..]);
        assert!(items[1].is_empty());
        // nested list stays encoded
        assert_eq!(items[2], &[0xC1u8, 0x01][..]);
    }

    #[test]
    fn test_decode_list_rejects_string_and_trailing() {
        assert!(decode_list(&[0x83, 0x61, 0x62, 0x63]).is_err());
        assert!(decode_list(&[0xC1, 0x01, 0x02]).is_err());
        assert!(decode_list(&[0xC3, 0x01]).is_err());
        assert!(decode_list(&[]).is_err());
    }

    #[test]
    fn test_wrap_list_long_payload() {
        let payload = vec![0x01; 60];
        let wrapped = wrap_list(&payload);
        // long list: 0xF7 + 1 length byte
        assert_eq!(&wrapped[..2], &[0xF8u8, 60][..]);
        assert_eq!(decode_list(&wrapped).unwrap().len(), 60);
    }

    #[test]
    fn test_decode_bytes() {
        assert_eq!(decode_bytes(&[0x82, 0x01, 0x00]).unwrap(), &[0x01u8, 0x00][..]);
        assert_eq!(decode_bytes(&[0x42]).unwrap(), &[0x42u8][..]);
        assert!(decode_bytes(&[0xC0]).is_err());
    }
}
