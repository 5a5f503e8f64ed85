//! Protobuf Wire Writer
//!
//! Minimal proto3 encoder for the handful of Cosmos SDK messages that make
//! up a transaction. Scalars equal to their default value are omitted, the
//! same way the reference Go and prost encoders do; embedded messages and
//! repeated elements are always written.

/// Wire type 0
const WIRE_VARINT: u8 = 0;
/// Wire type 2
const WIRE_LEN: u8 = 2;

/// Something that knows how to write itself as a protobuf message body
pub trait ProtoMessage {
    fn encode_proto(&self, w: &mut ProtoWriter);

    fn to_proto_bytes(&self) -> Vec<u8> {
        let mut w = ProtoWriter::new();
        self.encode_proto(&mut w);
        w.into_bytes()
    }
}

/// Append-only protobuf encoder
#[derive(Debug, Default, Clone)]
pub struct ProtoWriter {
    buf: Vec<u8>,
}

impl ProtoWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn key(&mut self, field: u32, wire_type: u8) {
        encode_varint(((field as u64) << 3) | wire_type as u64, &mut self.buf);
    }

    fn length_delimited(&mut self, field: u32, data: &[u8]) {
        self.key(field, WIRE_LEN);
        encode_varint(data.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(data);
    }

    /// uint64 / uint32 / enum field, skipped when zero
    pub fn uint64(&mut self, field: u32, value: u64) -> &mut Self {
        if value != 0 {
            self.key(field, WIRE_VARINT);
            encode_varint(value, &mut self.buf);
        }
        self
    }

    pub fn uint32(&mut self, field: u32, value: u32) -> &mut Self {
        self.uint64(field, value as u64)
    }

    /// string field, skipped when empty
    pub fn string(&mut self, field: u32, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.length_delimited(field, value.as_bytes());
        }
        self
    }

    /// bytes field, skipped when empty
    pub fn bytes(&mut self, field: u32, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            self.length_delimited(field, value);
        }
        self
    }

    /// One element of a `repeated bytes` field; always written
    pub fn repeated_bytes(&mut self, field: u32, value: &[u8]) -> &mut Self {
        self.length_delimited(field, value);
        self
    }

    /// Embedded message; always written, even when its body is empty
    pub fn message<M: ProtoMessage + ?Sized>(&mut self, field: u32, msg: &M) -> &mut Self {
        let body = msg.to_proto_bytes();
        self.length_delimited(field, &body);
        self
    }

    /// Each element of a repeated message field
    pub fn repeated<M: ProtoMessage>(&mut self, field: u32, msgs: &[M]) -> &mut Self {
        for msg in msgs {
            self.message(field, msg);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode varint (protobuf base 128 varint)
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// `google.protobuf.Any`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl Any {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    /// Pack a message under the given type URL
    pub fn pack<M: ProtoMessage + ?Sized>(type_url: &str, msg: &M) -> Self {
        Self::new(type_url, msg.to_proto_bytes())
    }
}

impl ProtoMessage for Any {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.string(1, &self.type_url).bytes(2, &self.value);
    }
}
