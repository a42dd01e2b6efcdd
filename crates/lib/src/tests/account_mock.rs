use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::program::Global;

const DEFAULT_LAMPORTS: u64 = 1_000_000;
const DEFAULT_RENT_EPOCH: u64 = 0;
// The program allocates Global with room to spare
const GLOBAL_ACCOUNT_PADDING: usize = 64;

pub struct AccountMockBuilder {
    lamports: u64,
    data: Vec<u8>,
    owner: Pubkey,
    executable: bool,
    rent_epoch: u64,
}

impl Default for AccountMockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountMockBuilder {
    pub fn new() -> Self {
        Self {
            lamports: DEFAULT_LAMPORTS,
            data: vec![0u8; 100],
            owner: Pubkey::new_unique(),
            executable: false,
            rent_epoch: DEFAULT_RENT_EPOCH,
        }
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = owner;
        self
    }

    pub fn build(self) -> Account {
        Account {
            lamports: self.lamports,
            data: self.data,
            owner: self.owner,
            executable: self.executable,
            rent_epoch: self.rent_epoch,
        }
    }
}

/// Builds a `Global` account as the program would store it, trailing padding included.
pub struct GlobalAccountMockBuilder {
    global: Global,
    owner: Pubkey,
    padding: usize,
}

impl GlobalAccountMockBuilder {
    pub fn new(global: Global) -> Self {
        Self { global, owner: Pubkey::new_unique(), padding: GLOBAL_ACCOUNT_PADDING }
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn build(self) -> Account {
        let mut data = self.global.to_account_data().unwrap();
        data.resize(data.len() + self.padding, 0);

        AccountMockBuilder::new().with_owner(self.owner).with_data(data).build()
    }
}
