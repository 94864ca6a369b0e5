//! Operations carried by a transaction.

use bytes::{Buf, BufMut, Bytes};
use mason_codec::{Encode, EncodeSize, Error as CodecError, Read, Write};
use mason_cryptography::{hash, Digest};

const CALL_CONTRACT: u8 = 0;
const UPLOAD_CONTRACT: u8 = 1;
const SET_SYSTEM_CALL: u8 = 2;
const SET_SYSTEM_CONTRACT: u8 = 3;

/// A single action a transaction asks the chain to perform.
///
/// Immutable once constructed; the transaction builder commits to each
/// operation's canonical encoding through the operation Merkle root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Invoke a contract entry point.
    CallContract {
        contract_id: Bytes,
        entry_point: u32,
        args: Bytes,
    },
    /// Upload contract bytecode.
    UploadContract {
        contract_id: Bytes,
        bytecode: Bytes,
        abi: Bytes,
    },
    /// Route a system call to a contract target.
    SetSystemCall { call_id: u32, target: Bytes },
    /// Mark a contract as a system contract (or revoke that status).
    SetSystemContract { contract_id: Bytes, system: bool },
}

impl Operation {
    /// Returns the digest of this operation's canonical encoding, the leaf
    /// fed into the operation Merkle root.
    pub fn digest(&self) -> Digest {
        hash(&self.encode())
    }
}

impl Write for Operation {
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Operation::CallContract {
                contract_id,
                entry_point,
                args,
            } => {
                buf.put_u8(CALL_CONTRACT);
                contract_id.write(buf);
                entry_point.write(buf);
                args.write(buf);
            }
            Operation::UploadContract {
                contract_id,
                bytecode,
                abi,
            } => {
                buf.put_u8(UPLOAD_CONTRACT);
                contract_id.write(buf);
                bytecode.write(buf);
                abi.write(buf);
            }
            Operation::SetSystemCall { call_id, target } => {
                buf.put_u8(SET_SYSTEM_CALL);
                call_id.write(buf);
                target.write(buf);
            }
            Operation::SetSystemContract {
                contract_id,
                system,
            } => {
                buf.put_u8(SET_SYSTEM_CONTRACT);
                contract_id.write(buf);
                system.write(buf);
            }
        }
    }
}

impl EncodeSize for Operation {
    fn encode_size(&self) -> usize {
        1 + match self {
            Operation::CallContract {
                contract_id,
                entry_point,
                args,
            } => contract_id.encode_size() + entry_point.encode_size() + args.encode_size(),
            Operation::UploadContract {
                contract_id,
                bytecode,
                abi,
            } => contract_id.encode_size() + bytecode.encode_size() + abi.encode_size(),
            Operation::SetSystemCall { call_id, target } => {
                call_id.encode_size() + target.encode_size()
            }
            Operation::SetSystemContract {
                contract_id,
                system,
            } => contract_id.encode_size() + system.encode_size(),
        }
    }
}

impl Read for Operation {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        match u8::read(buf)? {
            CALL_CONTRACT => Ok(Operation::CallContract {
                contract_id: Bytes::read(buf)?,
                entry_point: u32::read(buf)?,
                args: Bytes::read(buf)?,
            }),
            UPLOAD_CONTRACT => Ok(Operation::UploadContract {
                contract_id: Bytes::read(buf)?,
                bytecode: Bytes::read(buf)?,
                abi: Bytes::read(buf)?,
            }),
            SET_SYSTEM_CALL => Ok(Operation::SetSystemCall {
                call_id: u32::read(buf)?,
                target: Bytes::read(buf)?,
            }),
            SET_SYSTEM_CONTRACT => Ok(Operation::SetSystemContract {
                contract_id: Bytes::read(buf)?,
                system: bool::read(buf)?,
            }),
            tag => Err(CodecError::UnknownVariant("operation", tag)),
        }
    }
}
