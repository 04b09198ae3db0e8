//! Byte-exact constants from S.S0055: opcodes, the family key, and the two
//! "RAND Corporation book" whitening constants (see [`crate::poly`]).

/// Length, in bytes, of the long-term pre-shared subscriber key K.
pub const K_LEN: usize = 16;
/// Length, in bytes, of the random challenge RAND.
pub const RAND_LEN: usize = 16;
/// Length, in bytes, of the sequence number SQN.
pub const SQN_LEN: usize = 6;
/// Length, in bytes, of the authentication management field AMF.
pub const AMF_LEN: usize = 2;
/// Length, in bytes, of the f1/f1* MAC output.
pub const MAC_LEN: usize = 8;
/// Length, in bytes, of the f5/f5* anonymity key output.
pub const AK_LEN: usize = 6;
/// Length, in bytes, of the f3 cipher key output.
pub const CK_LEN: usize = 16;
/// Length, in bytes, of the f4 integrity key output.
pub const IK_LEN: usize = 16;
/// Length, in bytes, of the f2 response output.
pub const RES_LEN: usize = 16;
/// Length, in bytes, of the assembled AUTN token (SQN^AK ‖ AMF ‖ MAC).
pub const AUTN_LEN: usize = SQN_LEN + AMF_LEN + MAC_LEN;
/// Length, in bytes, of the assembled AUTS resync token (SQN^AKS ‖ MACS).
pub const AUTS_LEN: usize = SQN_LEN + MAC_LEN;

/// Length, in bytes, of the PRF payload buffer fed into `step3`.
pub const PAYLOAD_LEN: usize = 64;
/// Length, in bytes, of a keyed-SHA-1 digest (five 32-bit words).
pub const HASH_LEN: usize = 20;
/// Byte the PRF payload buffer is filled with before being XOR-patched.
pub const PAYLOAD_FILL: u8 = 0x5C;

/// Opcode identifying f1 in the payload.
pub const OP_F1: u8 = 0x42;
/// Opcode identifying f1* in the payload.
pub const OP_F1STAR: u8 = 0x43;
/// Opcode identifying f2 in the payload.
pub const OP_F2: u8 = 0x44;
/// Opcode identifying f3 in the payload.
pub const OP_F3: u8 = 0x45;
/// Opcode identifying f4 in the payload.
pub const OP_F4: u8 = 0x46;
/// Opcode identifying f5 in the payload.
pub const OP_F5: u8 = 0x47;
/// Opcode identifying f5* in the payload.
pub const OP_F5STAR: u8 = 0x48;

/// Family Master Key, "AHAG" in ASCII, domain-separating the fx functions
/// from any other keyed-SHA-1 consumer sharing the same PRF.
pub const FMK: [u8; 4] = [0x41, 0x48, 0x41, 0x47];

/// Irreducible reduction polynomial `g = T^160 + T^5 + T^3 + T^2 + 1`,
/// encoded big-endian as 21 bytes (one leading 0x01, nineteen zero bytes,
/// then 0x2d = 0b0010_1101 covering the T^5/T^3/T^2/T^0 terms).
pub const WHITEN_G: [u8; 21] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x2d,
];

/// "RAND Corporation book" constant `a`, used as the whitening multiplier.
pub const WHITEN_A: [u8; 20] = [
    0x9d, 0xe9, 0xc9, 0xc8, 0xef, 0xd5, 0x78, 0x11, 0x48, 0x23, 0x14, 0x01, 0x90, 0x1f, 0x2d, 0x49,
    0x3f, 0x4c, 0x63, 0x65,
];

/// "RAND Corporation book" constant `b`, used as the whitening addend.
pub const WHITEN_B: [u8; 20] = [
    0x75, 0xef, 0xd1, 0x5c, 0x4b, 0x8f, 0x8f, 0x51, 0x4e, 0xf3, 0xbc, 0xc3, 0x79, 0x4a, 0x76, 0x5e,
    0x7e, 0xec, 0x45, 0xe0,
];
