use crate::tvm::address::Address;
use crate::tvm::builder::Builder;
use crate::tvm::cell::ArcCell;
use crate::tvm::error::CellError;

/// `StateInit` with code and data only; split depth, tick-tock and
/// libraries are always absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInit {
    pub code: ArcCell,
    pub data: ArcCell,
}

impl StateInit {
    pub fn new(code: ArcCell, data: ArcCell) -> Self {
        Self { code, data }
    }

    /// `_ split_depth:(Maybe (## 5)) special:(Maybe TickTock)
    ///  code:(Maybe ^Cell) data:(Maybe ^Cell) library:(Maybe ^Cell) = StateInit`
    pub fn to_cell(&self) -> Result<ArcCell, CellError> {
        let mut builder = Builder::new();
        builder.store_uint(0, 2)?;
        builder.store_maybe_ref(Some(self.code.clone()))?;
        builder.store_maybe_ref(Some(self.data.clone()))?;
        builder.store_bit(false)?;
        builder.build()
    }

    /// Address the chain assigns to a contract deployed with this state
    pub fn address(&self, workchain: i8) -> Result<Address, CellError> {
        Ok(Address::new(workchain, self.to_cell()?.hash()))
    }
}
