//! Minter encoding, decoding and invocation tests with in-memory fakes

use crate::jetton::*;
use crate::provider::{ContractProvider, InternalMessage, MessageSender, ProviderError, SendMode};
use crate::tvm::*;
use async_trait::async_trait;
use num_bigint::BigInt;
use std::sync::Mutex;

const RECIPIENT: &str = "0:4818f679ede118884806590b9b705a00fa6aa0cf7009d4b3d128ff263b031c88";
const OTHER: &str = "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8";

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn code_cell(tag: u32) -> ArcCell {
    let mut builder = Builder::new();
    builder.store_u32(tag).unwrap();
    builder.build().unwrap()
}

#[derive(Debug, PartialEq)]
enum Field {
    Uint(u64, usize),
    Coins(u128),
    Address(Address),
}

#[derive(Default)]
struct RecordingWriter {
    fields: Vec<Field>,
}

impl PayloadWriter for RecordingWriter {
    fn write_uint(&mut self, value: u64, bits: usize) -> Result<(), CellError> {
        self.fields.push(Field::Uint(value, bits));
        Ok(())
    }

    fn write_coins(&mut self, amount: u128) -> Result<(), CellError> {
        self.fields.push(Field::Coins(amount));
        Ok(())
    }

    fn write_address(&mut self, address: &Address) -> Result<(), CellError> {
        self.fields.push(Field::Address(*address));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<InternalMessage>>,
}

impl RecordingSender {
    fn sent(&self) -> Vec<InternalMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_internal(&self, message: InternalMessage) -> Result<(), ProviderError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

struct FakeProvider {
    response: Mutex<Option<Result<Vec<StackEntry>, ProviderError>>>,
    calls: Mutex<Vec<(Address, String, Vec<StackEntry>)>>,
}

impl FakeProvider {
    fn returning(response: Result<Vec<StackEntry>, ProviderError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContractProvider for FakeProvider {
    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: Vec<StackEntry>,
    ) -> Result<Vec<StackEntry>, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((*address, method.to_string(), stack));
        self.response
            .lock()
            .unwrap()
            .take()
            .expect("provider called twice")
    }
}

struct StaticLoader(ArcCell);

impl CodeLoader for StaticLoader {
    fn load_minter_code(&self) -> Result<ArcCell, CodeLoadError> {
        Ok(self.0.clone())
    }
}

fn jetton_data_stack(admin: &Address) -> Vec<StackEntry> {
    vec![
        StackEntry::Num(BigInt::from(INITIAL_TOTAL_SUPPLY)),
        StackEntry::address_slice(admin).unwrap(),
        StackEntry::Cell(code_cell(0xC0DE)),
        StackEntry::Cell(JettonContent::default().to_cell().unwrap()),
    ]
}

#[test]
fn test_mint_payload_layout() {
    let to = addr(RECIPIENT);
    let message = MinterMessage::Mint {
        to,
        amount: 1_000_000_000,
    };
    let cell = message.to_cell().unwrap();
    assert_eq!(cell.bit_len(), 32 + 267 + 4 + 32);
    assert!(cell.references().is_empty());

    let mut slice = CellSlice::new(cell.clone());
    assert_eq!(slice.load_u32().unwrap(), MINT_OPCODE);
    assert_eq!(slice.load_address().unwrap(), Some(to));
    assert_eq!(slice.load_coins().unwrap(), 1_000_000_000);
    assert!(slice.is_empty());

    assert_eq!(MinterMessage::from_cell(cell).unwrap(), message);
}

#[test]
fn test_messages_round_trip_across_ranges() {
    let amounts = [0, 1, 1_000_000_000, MAX_COINS];
    let addresses = [
        Address::new(-1, [0xffu8; 32]),
        Address::new(0, [0u8; 32]),
        addr(RECIPIENT),
    ];
    let query_ids = [0, u64::MAX];

    for amount in amounts {
        for (i, address) in addresses.iter().enumerate() {
            let other = addresses[(i + 1) % addresses.len()];
            let mut messages = vec![
                MinterMessage::Mint {
                    to: *address,
                    amount,
                },
                MinterMessage::Notify {
                    sender: *address,
                    amount,
                    comment: NotifyComment(other),
                },
            ];
            for query_id in query_ids {
                messages.push(MinterMessage::BurnNotification {
                    query_id,
                    amount,
                    from: *address,
                });
            }

            for message in messages {
                let cell = message.to_cell().unwrap();
                let decoded = MinterMessage::from_cell(cell).unwrap();
                assert_eq!(decoded, message);
                match decoded {
                    MinterMessage::Mint { to, .. } => assert_eq!(to.workchain, address.workchain),
                    MinterMessage::BurnNotification { from, .. } => {
                        assert_eq!(from.workchain, address.workchain)
                    }
                    MinterMessage::Notify { sender, .. } => {
                        assert_eq!(sender.workchain, address.workchain)
                    }
                    MinterMessage::ChangeAdmin { .. } => unreachable!(),
                }
            }
        }
    }
}

#[test]
fn test_burn_notification_field_order() {
    let from = addr(OTHER);
    let message = MinterMessage::BurnNotification {
        query_id: 7,
        amount: 500,
        from,
    };

    let mut writer = RecordingWriter::default();
    message.write_to(&mut writer).unwrap();
    assert_eq!(
        writer.fields,
        vec![
            Field::Uint(BURN_OPCODE as u64, 32),
            Field::Uint(7, 64),
            Field::Coins(500),
            Field::Address(from),
        ]
    );

    let decoded = MinterMessage::from_cell(message.to_cell().unwrap()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_change_admin_is_opcode_then_address() {
    let new_admin = addr(OTHER);
    let cell = MinterMessage::ChangeAdmin { new_admin }.to_cell().unwrap();

    let mut expected = Builder::new();
    expected.store_u32(CHANGE_OWNER_OPCODE).unwrap();
    expected.store_address(Some(&new_admin)).unwrap();
    assert_eq!(cell, expected.build().unwrap());
}

#[test]
fn test_notify_encodes_comment_as_address() {
    let comment: NotifyComment = RECIPIENT.parse().unwrap();
    let message = MinterMessage::Notify {
        sender: addr(OTHER),
        amount: 42,
        comment,
    };

    let mut writer = RecordingWriter::default();
    message.write_to(&mut writer).unwrap();
    assert_eq!(
        writer.fields,
        vec![
            Field::Uint(JETTON_NOTIFY_OPCODE as u64, 32),
            Field::Address(addr(OTHER)),
            Field::Coins(42),
            Field::Address(addr(RECIPIENT)),
        ]
    );
}

#[test]
fn test_coin_boundary_and_no_partial_payload() {
    let to = addr(RECIPIENT);
    let at_max = MinterMessage::Mint {
        to,
        amount: MAX_COINS,
    };
    assert!(at_max.to_cell().is_ok());

    let above = MinterMessage::Mint {
        to,
        amount: MAX_COINS + 1,
    };
    let mut writer = RecordingWriter::default();
    let err = above.write_to(&mut writer).unwrap_err();
    assert!(matches!(err, EncodeError::AmountOutOfRange(_)));
    assert!(writer.fields.is_empty());
}

#[test]
fn test_malformed_addresses_fail_before_encoding() {
    for bad in ["", "0:abc", "not-an-address", "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2O"] {
        let err = bad.parse::<Address>().map_err(EncodeError::from).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidAddress(_)), "{bad:?}");
    }
}

#[test]
fn test_from_cell_rejects_unknown_and_trailing() {
    let mut unknown = Builder::new();
    unknown.store_u32(0xdeadbeef).unwrap();
    assert!(matches!(
        MinterMessage::from_cell(unknown.build().unwrap()),
        Err(DecodeError::UnknownOpcode(0xdeadbeef))
    ));

    let mut trailing = Builder::new();
    trailing.store_u32(CHANGE_OWNER_OPCODE).unwrap();
    trailing.store_address(Some(&addr(OTHER))).unwrap();
    trailing.store_bit(true).unwrap();
    assert!(matches!(
        MinterMessage::from_cell(trailing.build().unwrap()),
        Err(DecodeError::TrailingData { bits: 1, refs: 0 })
    ));

    let mut truncated = Builder::new();
    truncated.store_u32(MINT_OPCODE).unwrap();
    assert!(matches!(
        MinterMessage::from_cell(truncated.build().unwrap()),
        Err(DecodeError::Body(_))
    ));
}

#[test]
fn test_parse_jetton_data() {
    let admin = addr(RECIPIENT);
    let data = parse_jetton_data(jetton_data_stack(&admin)).unwrap();
    assert_eq!(data.total_supply, INITIAL_TOTAL_SUPPLY);
    assert_eq!(data.admin, Some(admin));
    assert_eq!(data.wallet_code, code_cell(0xC0DE));
    assert_eq!(
        JettonContent::from_cell(data.metadata).unwrap(),
        JettonContent::default()
    );
}

#[test]
fn test_jetton_data_missing_metadata_is_an_error() {
    let mut stack = jetton_data_stack(&addr(RECIPIENT));
    stack.pop();

    let err = parse_jetton_data(stack).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::MalformedResponse(StackError::Underflow {
            index: 3,
            expected: "cell",
            len: 3
        })
    ));
}

#[test]
fn test_jetton_data_wrong_tag_is_an_error() {
    let mut stack = jetton_data_stack(&addr(RECIPIENT));
    stack[0] = StackEntry::Cell(code_cell(1));

    let err = parse_jetton_data(stack).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::MalformedResponse(StackError::UnexpectedEntry {
            index: 0,
            expected: "num",
            found: "cell"
        })
    ));
}

#[test]
fn test_parse_wallet_address() {
    let wallet = addr(OTHER);
    let stack = vec![StackEntry::address_slice(&wallet).unwrap()];
    assert_eq!(parse_wallet_address(stack).unwrap(), wallet);

    let mut none = Builder::new();
    none.store_address(None).unwrap();
    let err = parse_wallet_address(vec![StackEntry::Slice(none.build().unwrap())]).unwrap_err();
    assert!(matches!(err, DecodeError::MissingAddress(_)));

    assert!(matches!(
        parse_wallet_address(vec![]),
        Err(DecodeError::MalformedResponse(StackError::Underflow { .. }))
    ));
}

#[test]
fn test_wallet_address_derivation() {
    let minter = addr(OTHER);
    let wallet_code = code_cell(0xC0DE);
    let owner = addr(RECIPIENT);

    let first = JettonMinter::calculate_wallet_address(&owner, &minter, &wallet_code).unwrap();
    let second = JettonMinter::calculate_wallet_address(&owner, &minter, &wallet_code).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.workchain, BASECHAIN);

    let mut data = Builder::new();
    data.store_coins(0).unwrap();
    data.store_address(Some(&owner)).unwrap();
    data.store_address(Some(&minter)).unwrap();
    data.store_ref(wallet_code.clone()).unwrap();
    let init = StateInit::new(wallet_code.clone(), data.build().unwrap());
    assert_eq!(first.hash_part, init.to_cell().unwrap().hash());

    let other_owner = JettonMinter::calculate_wallet_address(&minter, &minter, &wallet_code).unwrap();
    assert_ne!(first, other_owner);
}

#[test]
fn test_init_builds_minter_data() {
    let wallet_code = code_cell(0xC0DE);
    let minter_code = code_cell(0xABCD);
    let init = JettonMinter::init(wallet_code.clone(), &StaticLoader(minter_code.clone())).unwrap();
    assert_eq!(init.code, minter_code);

    let mut slice = CellSlice::new(init.data.clone());
    assert_eq!(slice.load_coins().unwrap(), INITIAL_TOTAL_SUPPLY);
    assert_eq!(slice.load_address().unwrap(), Some(addr(INITIAL_OWNER)));
    assert_eq!(slice.load_address().unwrap(), Some(addr(INITIAL_OWNER)));
    assert_eq!(slice.load_ref().unwrap(), wallet_code);
    let content = JettonContent::from_cell(slice.load_ref().unwrap()).unwrap();
    assert_eq!(content.tag, DEFAULT_CONTENT_TAG);
    assert_eq!(content.uri, DEFAULT_METADATA_URI);
    assert!(slice.is_empty());

    let minter = JettonMinter::from_init(init.clone(), BASECHAIN).unwrap();
    assert_eq!(minter.address.hash_part, init.state_init().to_cell().unwrap().hash());
}

#[test]
fn test_total_supply_must_fit_coins() {
    let mut config = MinterConfig::initial(code_cell(1)).unwrap();
    config.total_supply = MAX_COINS + 1;
    assert!(matches!(
        config.to_data_cell(),
        Err(EncodeError::AmountOutOfRange(_))
    ));
}

#[tokio::test]
async fn test_default_forward_value() {
    let minter = JettonMinter::new(addr(OTHER));
    let sender = RecordingSender::default();
    let someone = addr(RECIPIENT);

    minter.send_mint(&sender, &someone, 1, None).await.unwrap();
    minter
        .send_burn_notification(&sender, &someone, 1, 0, None)
        .await
        .unwrap();
    minter.send_change_admin(&sender, &someone, None).await.unwrap();
    minter
        .send_notify(&sender, &someone, 1, RECIPIENT, None)
        .await
        .unwrap();

    let sent = sender.sent();
    assert_eq!(sent.len(), 4);
    for message in &sent {
        assert_eq!(message.value, 50_000_000);
        assert_eq!(message.send_mode, SendMode::PAY_GAS_SEPARATELY);
        assert_eq!(message.to, addr(OTHER));
        assert!(message.bounce);
    }
    let opcodes: Vec<u32> = sent
        .iter()
        .map(|m| CellSlice::new(m.body.clone().unwrap()).load_u32().unwrap())
        .collect();
    assert_eq!(
        opcodes,
        vec![MINT_OPCODE, BURN_OPCODE, CHANGE_OWNER_OPCODE, JETTON_NOTIFY_OPCODE]
    );
}

#[tokio::test]
async fn test_forward_value_override() {
    let minter = JettonMinter::new(addr(OTHER)).with_forward_ton(10);
    let sender = RecordingSender::default();

    minter
        .send_mint(&sender, &addr(RECIPIENT), 5, Some(123))
        .await
        .unwrap();
    minter
        .send_change_admin(&sender, &addr(RECIPIENT), None)
        .await
        .unwrap();

    let values: Vec<u128> = sender.sent().iter().map(|m| m.value).collect();
    assert_eq!(values, vec![123, 10]);
}

#[tokio::test]
async fn test_invalid_comment_sends_nothing() {
    let minter = JettonMinter::new(addr(OTHER));
    let sender = RecordingSender::default();

    let err = minter
        .send_notify(&sender, &addr(RECIPIENT), 1, "gm", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JettonError::Encode(EncodeError::InvalidComment(_))
    ));
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_deploy_requires_init() {
    let sender = RecordingSender::default();
    let err = JettonMinter::new(addr(OTHER))
        .send_deploy(&sender, 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        JettonError::Encode(EncodeError::MissingField("state_init"))
    ));

    let init = JettonMinter::init(code_cell(1), &StaticLoader(code_cell(2))).unwrap();
    let minter = JettonMinter::from_init(init.clone(), BASECHAIN).unwrap();
    minter.send_deploy(&sender, 100).await.unwrap();

    let sent = sender.sent();
    assert_eq!(sent[0].state_init, Some(init.state_init()));
    assert!(sent[0].body.is_none());
    assert!(!sent[0].bounce);
}

#[tokio::test]
async fn test_get_wallet_address_query() {
    let wallet = addr(RECIPIENT);
    let provider = FakeProvider::returning(Ok(vec![StackEntry::address_slice(&wallet).unwrap()]));
    let minter = JettonMinter::new(addr(OTHER));
    let owner = addr(OTHER);

    let result = minter.get_wallet_address(&provider, &owner).await.unwrap();
    assert_eq!(result, wallet);

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, addr(OTHER));
    assert_eq!(calls[0].1, GET_WALLET_ADDRESS_METHOD);
    assert_eq!(calls[0].2, vec![StackEntry::address_slice(&owner).unwrap()]);
}

#[tokio::test]
async fn test_get_jetton_data() {
    let admin = addr(RECIPIENT);
    let provider = FakeProvider::returning(Ok(jetton_data_stack(&admin)));
    let minter = JettonMinter::new(addr(OTHER));

    let data = minter.get_jetton_data(&provider).await.unwrap();
    assert_eq!(data.admin, Some(admin));
    assert_eq!(provider.calls.lock().unwrap()[0].1, GET_JETTON_DATA_METHOD);
}

#[test]
fn test_transport_errors_pass_through() {
    let provider = FakeProvider::returning(Err(ProviderError::ExitCode {
        method: GET_JETTON_DATA_METHOD.to_string(),
        exit_code: 11,
    }));
    let minter = JettonMinter::new(addr(OTHER));

    let err = tokio_test::block_on(minter.get_jetton_data(&provider)).unwrap_err();
    assert!(matches!(
        err,
        JettonError::Transport(ProviderError::ExitCode { exit_code: 11, .. })
    ));
}
