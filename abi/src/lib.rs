//! Solidity bindings for the game contracts
//!
//! The contracts themselves live outside of this workspace; these bindings
//! only cover the surface the deployment scripts and clients touch.

#![deny(missing_docs)]

use alloy::sol;

sol! {
    /// OpenZeppelin's `Ownable`, inherited by every game contract
    #[sol(rpc, all_derives)]
    #[allow(missing_docs)]
    interface IOwnable {
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);

        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }
}

sol! {
    /// The ERC721 character contract
    #[sol(rpc)]
    #[allow(missing_docs, clippy::too_many_arguments)]
    interface IGameCharacter {
        function setMinter(address minter) external;

        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function characterStats(uint256 tokenId) external view returns (
            string memory name,
            string memory description,
            uint256 level,
            uint256 experience,
            uint8 characterClass,
            uint256 strength,
            uint256 dexterity,
            uint256 intelligence
        );
    }
}

sol! {
    /// The ERC1155 item contract
    #[sol(rpc)]
    #[allow(missing_docs)]
    interface IGameItem {
        function setMinter(address minter) external;

        function createItemType(
            string memory name,
            string memory description,
            uint256 initialSupply,
            address recipient
        ) external returns (uint256);
        function mintItem(address to, uint256 id, uint256 amount, bytes memory data) external;
        function nextTokenId() external view returns (uint256);
        function itemTypes(uint256 id)
            external
            view
            returns (string memory name, string memory description);
        function uri(uint256 id) external view returns (string memory);
        function balanceOf(address account, uint256 id) external view returns (uint256);
    }
}

sol! {
    /// The game logic coordinator, owned by the administrator from construction
    #[sol(rpc)]
    #[allow(missing_docs, clippy::too_many_arguments)]
    interface IGameLogic {
        function setGameCharacterContract(address gameCharacter) external;
        function setGameItemContract(address gameItem) external;

        function playerMintNewCharacter(
            string memory name,
            string memory description,
            uint8 characterClass,
            uint256 strength,
            uint256 dexterity,
            uint256 intelligence
        ) external returns (uint256);
    }
}

sol! {
    /// Constructor argument tuples for the game contracts
    #[allow(missing_docs)]
    struct GameCharacterConstructor {
        string baseUri;
    }

    #[allow(missing_docs)]
    struct GameItemConstructor {
        string uri;
    }

    #[allow(missing_docs)]
    struct GameTokenConstructor {
        uint256 initialSupply;
    }

    #[allow(missing_docs)]
    struct GameLogicConstructor {
        address initialOwner;
    }
}
