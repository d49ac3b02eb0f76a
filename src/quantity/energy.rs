quantity!(KilowattHours, suffix: "kWh", precision: 1);
