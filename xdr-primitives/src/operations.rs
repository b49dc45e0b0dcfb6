//! Operations: the individual actions a transaction bundles together.

use xdr_codec::{utils::VecM, xdr_enum, Codec, Reader, Writer};

use crate::account::MuxedAccount;
use crate::asset::{Asset, ChangeTrustAsset, Price};
use crate::auth::SorobanAuthorizationEntry;

pub const MANAGE_DATA_VALUE_MAX: u32 = 64;
pub const MANAGE_DATA_NAME_MAX: u32 = 64;
pub const PATH_MAX: u32 = 5;
pub const HOST_FN_ARGS_MAX: u32 = 256;
pub const AUTH_ENTRIES_MAX: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    CreateAccount,
    Payment,
    PathPaymentStrictReceive,
    ManageSellOffer,
    ChangeTrust,
    AccountMerge,
    ManageData,
    BumpSequence,
    InvokeHostFunction,
}

xdr_enum!(OperationType {
    CreateAccount = 0,
    Payment = 1,
    PathPaymentStrictReceive = 2,
    ManageSellOffer = 3,
    ChangeTrust = 6,
    AccountMerge = 8,
    ManageData = 10,
    BumpSequence = 11,
    InvokeHostFunction = 24,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountOp {
    pub destination: MuxedAccount,
    pub starting_balance: i64,
}

xdr_codec::xdr_struct!(CreateAccountOp {
    destination: MuxedAccount,
    starting_balance: i64
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: i64,
}

xdr_codec::xdr_struct!(PaymentOp {
    destination: MuxedAccount,
    asset: Asset,
    amount: i64
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPaymentStrictReceiveOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: VecM<Asset, PATH_MAX>,
}

xdr_codec::xdr_struct!(PathPaymentStrictReceiveOp {
    send_asset: Asset,
    send_max: i64,
    destination: MuxedAccount,
    dest_asset: Asset,
    dest_amount: i64,
    path: VecM<Asset, PATH_MAX>
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

xdr_codec::xdr_struct!(ManageSellOfferOp {
    selling: Asset,
    buying: Asset,
    amount: i64,
    price: Price,
    offer_id: i64
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTrustOp {
    pub line: ChangeTrustAsset,
    pub limit: i64,
}

xdr_codec::xdr_struct!(ChangeTrustOp { line: ChangeTrustAsset, limit: i64 });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageDataOp {
    pub data_name: String,
    pub data_value: Option<Vec<u8>>,
}

impl Codec for ManageDataOp {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        w.write_string(&self.data_name, Some(MANAGE_DATA_NAME_MAX as usize))?;
        match &self.data_value {
            Some(v) => {
                w.write_bool(true)?;
                w.write_var_opaque(v, Some(MANAGE_DATA_VALUE_MAX as usize))
            }
            None => w.write_bool(false),
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        let data_name = r.read_string(Some(MANAGE_DATA_NAME_MAX as usize))?;
        let data_value = if r.read_bool()? {
            Some(r.read_var_opaque(Some(MANAGE_DATA_VALUE_MAX as usize))?)
        } else {
            None
        };
        Ok(ManageDataOp { data_name, data_value })
    }
}

/// `InvokeHostFunctionOp`: invoke a Soroban contract, carrying both the call
/// itself and the authorization entries for any accounts it needs to act on
/// behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeHostFunctionOp {
    pub function: crate::auth::InvokeContractArgs,
    pub auth: VecM<SorobanAuthorizationEntry, AUTH_ENTRIES_MAX>,
}

xdr_codec::xdr_struct!(InvokeHostFunctionOp {
    function: crate::auth::InvokeContractArgs,
    auth: VecM<SorobanAuthorizationEntry, AUTH_ENTRIES_MAX>
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPaymentStrictReceive(PathPaymentStrictReceiveOp),
    ManageSellOffer(ManageSellOfferOp),
    ChangeTrust(ChangeTrustOp),
    AccountMerge(MuxedAccount),
    ManageData(ManageDataOp),
    BumpSequence(i64),
    InvokeHostFunction(InvokeHostFunctionOp),
}

impl Codec for OperationBody {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            OperationBody::CreateAccount(op) => {
                OperationType::CreateAccount.encode(w)?;
                op.encode(w)
            }
            OperationBody::Payment(op) => {
                OperationType::Payment.encode(w)?;
                op.encode(w)
            }
            OperationBody::PathPaymentStrictReceive(op) => {
                OperationType::PathPaymentStrictReceive.encode(w)?;
                op.encode(w)
            }
            OperationBody::ManageSellOffer(op) => {
                OperationType::ManageSellOffer.encode(w)?;
                op.encode(w)
            }
            OperationBody::ChangeTrust(op) => {
                OperationType::ChangeTrust.encode(w)?;
                op.encode(w)
            }
            // `accountMerge`'s destination is encoded directly, without a
            // wrapping struct: the one place the union body isn't a struct.
            OperationBody::AccountMerge(dest) => {
                OperationType::AccountMerge.encode(w)?;
                dest.encode(w)
            }
            OperationBody::ManageData(op) => {
                OperationType::ManageData.encode(w)?;
                op.encode(w)
            }
            OperationBody::BumpSequence(seq) => {
                OperationType::BumpSequence.encode(w)?;
                seq.encode(w)
            }
            OperationBody::InvokeHostFunction(op) => {
                OperationType::InvokeHostFunction.encode(w)?;
                op.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match OperationType::decode(r)? {
            OperationType::CreateAccount => Ok(OperationBody::CreateAccount(CreateAccountOp::decode(r)?)),
            OperationType::Payment => Ok(OperationBody::Payment(PaymentOp::decode(r)?)),
            OperationType::PathPaymentStrictReceive => {
                Ok(OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp::decode(r)?))
            }
            OperationType::ManageSellOffer => {
                Ok(OperationBody::ManageSellOffer(ManageSellOfferOp::decode(r)?))
            }
            OperationType::ChangeTrust => Ok(OperationBody::ChangeTrust(ChangeTrustOp::decode(r)?)),
            OperationType::AccountMerge => Ok(OperationBody::AccountMerge(MuxedAccount::decode(r)?)),
            OperationType::ManageData => Ok(OperationBody::ManageData(ManageDataOp::decode(r)?)),
            OperationType::BumpSequence => Ok(OperationBody::BumpSequence(i64::decode(r)?)),
            OperationType::InvokeHostFunction => {
                Ok(OperationBody::InvokeHostFunction(InvokeHostFunctionOp::decode(r)?))
            }
        }
    }
}

/// `Operation`: an optional override of the transaction's source account
/// plus the operation body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

xdr_codec::xdr_struct!(Operation {
    source_account: Option<MuxedAccount>,
    body: OperationBody
});

#[cfg(test)]
mod tests {
    use super::*;

    fn dest() -> MuxedAccount {
        MuxedAccount::KeyTypeEd25519([4u8; 32])
    }

    #[test]
    fn create_account_round_trips() {
        let op = Operation {
            source_account: None,
            body: OperationBody::CreateAccount(CreateAccountOp {
                destination: dest(),
                starting_balance: 100,
            }),
        };
        let bytes = op.to_bytes().unwrap();
        assert_eq!(Operation::from_bytes(&bytes).unwrap(), op);
    }

    #[test]
    fn payment_round_trips_with_explicit_source() {
        let source = MuxedAccount::KeyTypeEd25519([1u8; 32]);
        let op = Operation {
            source_account: Some(source),
            body: OperationBody::Payment(PaymentOp {
                destination: dest(),
                asset: Asset::Native,
                amount: 5_000_000,
            }),
        };
        let bytes = op.to_bytes().unwrap();
        assert_eq!(Operation::from_bytes(&bytes).unwrap(), op);
    }

    #[test]
    fn account_merge_round_trips() {
        let op = Operation {
            source_account: None,
            body: OperationBody::AccountMerge(dest()),
        };
        let bytes = op.to_bytes().unwrap();
        assert_eq!(Operation::from_bytes(&bytes).unwrap(), op);
    }

    #[test]
    fn manage_data_round_trips_both_states() {
        let with_value = ManageDataOp {
            data_name: "key".to_string(),
            data_value: Some(vec![1, 2, 3]),
        };
        let bytes = with_value.to_bytes().unwrap();
        assert_eq!(ManageDataOp::from_bytes(&bytes).unwrap(), with_value);

        let cleared = ManageDataOp {
            data_name: "key".to_string(),
            data_value: None,
        };
        let bytes = cleared.to_bytes().unwrap();
        assert_eq!(ManageDataOp::from_bytes(&bytes).unwrap(), cleared);
    }

    #[test]
    fn invoke_host_function_round_trips() {
        let op = InvokeHostFunctionOp {
            function: crate::auth::InvokeContractArgs {
                contract_address: crate::scval::ScAddress::Contract([9u8; 32]),
                function_name: "hello".to_string(),
                args: VecM::empty(),
            },
            auth: VecM::empty(),
        };
        let bytes = op.to_bytes().unwrap();
        assert_eq!(InvokeHostFunctionOp::from_bytes(&bytes).unwrap(), op);
    }
}
