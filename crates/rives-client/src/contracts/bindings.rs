use ethers::contract::abigen;

abigen!(
    InputBox,
    r#"[
        function addInput(address appContract, bytes payload) external returns (bytes32)
        function getNumberOfInputs(address appContract) external view returns (uint256)
        event InputAdded(address indexed appContract, uint256 indexed index, bytes input)
    ]"#
);
