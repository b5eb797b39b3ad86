//! Integration Tests for the Transfer Hook Gate
//!
//! Exercise both instructions through `solana-program-test`, calling
//! `Execute` directly the way a token program would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p transfer_hook_gate
//! cargo test -p transfer_hook_gate --features instruction-introspection
//! ```

use solana_program::{
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    system_instruction, sysvar,
};
use solana_program_test::*;
use solana_sdk::{
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use transfer_hook_gate::{
    error::TransferHookError,
    get_extra_account_meta_list_address,
    instruction::{execute, initialize_extra_account_meta_list},
    offchain::{execute_with_extra_accounts, TransferAccounts},
    state::{ExtraAccountMeta, ExtraAccountMetaList, Seed},
};

// =============================================================================
// TEST SETUP HELPERS
// =============================================================================

fn program_test() -> ProgramTest {
    ProgramTest::new(
        "transfer_hook_gate",
        transfer_hook_gate::id(),
        processor!(transfer_hook_gate::processor::Processor::process),
    )
}

fn sample_metas() -> Vec<ExtraAccountMeta> {
    vec![
        ExtraAccountMeta::new_with_pubkey(&sysvar::instructions::id(), false, false),
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal {
                    bytes: b"counter".to_vec(),
                },
                Seed::AccountKey { index: 3 },
            ],
            false,
            true,
        )
        .unwrap(),
    ]
}

fn sample_transfer(mint: &Pubkey) -> TransferAccounts {
    TransferAccounts {
        source: Pubkey::new_unique(),
        mint: *mint,
        destination: Pubkey::new_unique(),
        authority: Pubkey::new_unique(),
        amount: 1,
        decimals: 0,
    }
}

async fn process(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
) -> Result<(), BanksClientError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &[&context.payer],
        blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

async fn initialize_list(
    context: &mut ProgramTestContext,
    mint: &Pubkey,
    metas: &[ExtraAccountMeta],
) -> Result<(), BanksClientError> {
    let ix = initialize_extra_account_meta_list(
        &transfer_hook_gate::id(),
        &context.payer.pubkey(),
        mint,
        metas,
    )
    .unwrap();
    process(context, &[ix]).await
}

async fn list_data(context: &mut ProgramTestContext, mint: &Pubkey) -> Vec<u8> {
    let address = get_extra_account_meta_list_address(mint, &transfer_hook_gate::id());
    context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .expect("list account exists")
        .data
}

fn assert_custom_error(result: Result<(), BanksClientError>, expected: TransferHookError) {
    assert_eq!(
        result.unwrap_err().unwrap(),
        TransactionError::InstructionError(0, InstructionError::Custom(expected as u32))
    );
}

// =============================================================================
// INITIALIZE EXTRA ACCOUNT META LIST
// =============================================================================

#[tokio::test]
async fn test_initialize_list() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();

    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let address = get_extra_account_meta_list_address(&mint, &transfer_hook_gate::id());
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(account.owner, transfer_hook_gate::id());
    assert_eq!(
        account.data.len(),
        ExtraAccountMetaList::size_of(sample_metas().len()).unwrap()
    );
    assert_eq!(
        ExtraAccountMetaList::decode(&account.data).unwrap(),
        sample_metas()
    );
}

#[tokio::test]
async fn test_initialize_twice_fails() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();

    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let second = initialize_list(&mut context, &mint, &sample_metas()[..1]).await;
    assert_custom_error(second, TransferHookError::AlreadyInitialized);

    // The first list is untouched
    let data = list_data(&mut context, &mint).await;
    assert_eq!(ExtraAccountMetaList::decode(&data).unwrap(), sample_metas());
}

#[tokio::test]
async fn test_initialize_wrong_address_fails() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    let wrong = Keypair::new();

    let mut ix = initialize_extra_account_meta_list(
        &transfer_hook_gate::id(),
        &context.payer.pubkey(),
        &mint,
        &sample_metas(),
    )
    .unwrap();
    ix.accounts[1] = AccountMeta::new(wrong.pubkey(), false);

    assert_custom_error(
        process(&mut context, &[ix]).await,
        TransferHookError::IncorrectListAddress,
    );
}

#[tokio::test]
async fn test_initialize_prefunded_address() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    let address = get_extra_account_meta_list_address(&mint, &transfer_hook_gate::id());

    // Someone sends lamports to the address before the list exists
    let fund = system_instruction::transfer(&context.payer.pubkey(), &address, 1_000_000);
    process(&mut context, &[fund]).await.unwrap();

    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .unwrap();
    let rent = context.banks_client.get_rent().await.unwrap();

    assert_eq!(account.owner, transfer_hook_gate::id());
    assert!(rent.is_exempt(account.lamports, account.data.len()));
    assert_eq!(
        ExtraAccountMetaList::decode(&account.data).unwrap(),
        sample_metas()
    );
}

// =============================================================================
// EXECUTE
// =============================================================================

#[cfg(not(feature = "instruction-introspection"))]
#[tokio::test]
async fn test_execute_accepts_resolved_accounts() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let data = list_data(&mut context, &mint).await;
    let ix = execute_with_extra_accounts(&transfer_hook_gate::id(), &sample_transfer(&mint), &data)
        .unwrap();

    process(&mut context, &[ix]).await.unwrap();
}

/// Called directly, the top-level instruction is the hook itself and not
/// the program owning the source account.
#[cfg(feature = "instruction-introspection")]
#[tokio::test]
async fn test_execute_outside_token_transfer_rejected() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let data = list_data(&mut context, &mint).await;
    let ix = execute_with_extra_accounts(&transfer_hook_gate::id(), &sample_transfer(&mint), &data)
        .unwrap();

    assert_custom_error(
        process(&mut context, &[ix]).await,
        TransferHookError::UnauthorizedCaller,
    );
}

#[tokio::test]
async fn test_execute_without_trailing_accounts_fails() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let transfer = sample_transfer(&mint);
    let ix = execute(
        &transfer_hook_gate::id(),
        &transfer.source,
        &transfer.mint,
        &transfer.destination,
        &transfer.authority,
        transfer.amount,
        transfer.decimals,
        &[],
    );

    assert_custom_error(
        process(&mut context, &[ix]).await,
        TransferHookError::AccountMismatch,
    );
}

#[tokio::test]
async fn test_execute_with_tampered_accounts_fails() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    initialize_list(&mut context, &mint, &sample_metas())
        .await
        .unwrap();

    let data = list_data(&mut context, &mint).await;
    let valid = execute_with_extra_accounts(&transfer_hook_gate::id(), &sample_transfer(&mint), &data)
        .unwrap();

    // Reordered
    let mut reordered = valid.clone();
    reordered.accounts.swap(5, 6);
    assert_custom_error(
        process(&mut context, &[reordered]).await,
        TransferHookError::AccountMismatch,
    );

    // Substituted
    let mut substituted = valid.clone();
    substituted.accounts[6].pubkey = Pubkey::new_unique();
    assert_custom_error(
        process(&mut context, &[substituted]).await,
        TransferHookError::AccountMismatch,
    );

    // Surplus
    let mut surplus = valid;
    surplus
        .accounts
        .push(AccountMeta::new_readonly(Pubkey::new_unique(), false));
    assert_custom_error(
        process(&mut context, &[surplus]).await,
        TransferHookError::AccountMismatch,
    );
}

#[tokio::test]
async fn test_execute_before_initialize_fails() {
    let mut context = program_test().start_with_context().await;
    let mint = Pubkey::new_unique();
    let transfer = sample_transfer(&mint);

    let ix = execute(
        &transfer_hook_gate::id(),
        &transfer.source,
        &transfer.mint,
        &transfer.destination,
        &transfer.authority,
        transfer.amount,
        transfer.decimals,
        &[
            AccountMeta::new_readonly(
                get_extra_account_meta_list_address(&mint, &transfer_hook_gate::id()),
                false,
            ),
            AccountMeta::new_readonly(transfer_hook_gate::id(), false),
        ],
    );

    assert_custom_error(
        process(&mut context, &[ix]).await,
        TransferHookError::NotInitialized,
    );
}
