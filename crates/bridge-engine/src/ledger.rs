//! Token ledger collaborator
//!
//! The bridge never owns balances. It calls a [`TokenLedger`] as its own
//! account (`operator`) and the ledger decides whether that account holds
//! MINTER / BURNER for the token.

use std::collections::HashMap;

use bridge_core::{Address, Amount, LedgerError, Role};

use crate::access::AccessControl;

/// Mint/burn interface the bridge drives, keyed by token address
pub trait TokenLedger {
    fn mint(
        &mut self,
        token: &Address,
        operator: &Address,
        account: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    fn burn(
        &mut self,
        token: &Address,
        operator: &Address,
        account: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    fn balance_of(&self, token: &Address, account: &Address) -> Amount;
}

#[derive(Debug, Clone)]
struct TokenBook {
    symbol: String,
    roles: AccessControl,
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

/// In-process ledger holding any number of fungible tokens.
///
/// Each token has its own role store; the registering owner holds ADMIN,
/// MINTER and BURNER on it, as a freshly deployed mintable token would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    tokens: HashMap<Address, TokenBook>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a token at `token` owned by `owner`
    pub fn register_token(
        &mut self,
        token: Address,
        symbol: impl Into<String>,
        owner: Address,
    ) -> Result<(), LedgerError> {
        if self.tokens.contains_key(&token) {
            return Err(LedgerError::TokenExists { token });
        }

        let roles = AccessControl::with_roles(owner, &[Role::Admin, Role::Minter, Role::Burner]);

        self.tokens.insert(
            token,
            TokenBook {
                symbol: symbol.into(),
                roles,
                balances: HashMap::new(),
                total_supply: 0,
            },
        );
        Ok(())
    }

    fn book(&self, token: &Address) -> Result<&TokenBook, LedgerError> {
        self.tokens
            .get(token)
            .ok_or(LedgerError::UnknownToken { token: *token })
    }

    fn book_mut(&mut self, token: &Address) -> Result<&mut TokenBook, LedgerError> {
        self.tokens
            .get_mut(token)
            .ok_or(LedgerError::UnknownToken { token: *token })
    }

    /// Grant a role on `token`; `caller` must hold ADMIN on it
    pub fn grant_role(
        &mut self,
        token: &Address,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        self.book_mut(token)?
            .roles
            .grant_role(caller, role, account)
            .map(|_| ())
            .map_err(|_| LedgerError::MissingRole {
                operator: *caller,
                role: Role::Admin,
            })
    }

    pub fn revoke_role(
        &mut self,
        token: &Address,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<(), LedgerError> {
        self.book_mut(token)?
            .roles
            .revoke_role(caller, role, account)
            .map(|_| ())
            .map_err(|_| LedgerError::MissingRole {
                operator: *caller,
                role: Role::Admin,
            })
    }

    pub fn has_role(&self, token: &Address, role: Role, account: &Address) -> bool {
        self.book(token)
            .map(|b| b.roles.has_role(role, account))
            .unwrap_or(false)
    }

    pub fn total_supply(&self, token: &Address) -> Amount {
        self.book(token).map(|b| b.total_supply).unwrap_or(0)
    }

    pub fn symbol(&self, token: &Address) -> Option<&str> {
        self.tokens.get(token).map(|b| b.symbol.as_str())
    }

    pub fn is_registered(&self, token: &Address) -> bool {
        self.tokens.contains_key(token)
    }
}

impl TokenLedger for InMemoryLedger {
    fn mint(
        &mut self,
        token: &Address,
        operator: &Address,
        account: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let book = self.book_mut(token)?;
        if !book.roles.has_role(Role::Minter, operator) {
            return Err(LedgerError::MissingRole {
                operator: *operator,
                role: Role::Minter,
            });
        }

        let supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = book.balances.entry(*account).or_insert(0);
        // supply bounds every balance, so this cannot overflow once supply didn't
        *balance += amount;
        book.total_supply = supply;
        Ok(())
    }

    fn burn(
        &mut self,
        token: &Address,
        operator: &Address,
        account: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let book = self.book_mut(token)?;
        if !book.roles.has_role(Role::Burner, operator) {
            return Err(LedgerError::MissingRole {
                operator: *operator,
                role: Role::Burner,
            });
        }

        let available = book.balances.get(account).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        book.balances.insert(*account, available - amount);
        book.total_supply -= amount;
        Ok(())
    }

    fn balance_of(&self, token: &Address, account: &Address) -> Amount {
        self.book(token)
            .ok()
            .and_then(|b| b.balances.get(account).copied())
            .unwrap_or(0)
    }
}
